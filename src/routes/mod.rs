use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod craftsmen;
pub mod orders;
pub mod products;

/// Maps a service failure to its HTTP response, logging it on the way.
///
/// An unreachable store answers 503 and any other storage failure 500, so a
/// failed listing is never confused with an empty page.
pub fn error_response(err: &ServiceError, action: &str) -> HttpResponse {
    let status = match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::Form(_) => StatusCode::BAD_REQUEST,
        err if err.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        log::error!("Failed to {action}: {err}");
    } else {
        log::warn!("Failed to {action}: {err}");
    }

    let message = if status.is_server_error() {
        format!("Failed to {action}")
    } else {
        err.to_string()
    };

    HttpResponse::build(status).json(json!({ "error": message }))
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// Registers every API route under `/api`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(
        web::scope("/api")
            .service(orders::list_orders)
            .service(orders::create_order)
            .service(orders::show_order)
            .service(orders::update_order_status)
            .service(orders::delete_order)
            .service(products::list_products)
            .service(products::create_product)
            .service(products::show_product)
            .service(products::update_product)
            .service(products::delete_product)
            .service(products::upload_product_image)
            .service(craftsmen::list_craftsmen)
            .service(craftsmen::create_craftsman)
            .service(craftsmen::show_craftsman)
            .service(craftsmen::delete_craftsman),
    );
}

/// JSON extractor settings answering malformed bodies with a JSON 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(json!({ "error": err.to_string() }));
        actix_web::error::InternalError::from_response(err, response).into()
    })
}
