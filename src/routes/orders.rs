use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::dto::listing::ListingParams;
use crate::forms::orders::{CreateOrderForm, UpdateOrderStatusForm};
use crate::listing::ListingRequest;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::orders as orders_service;

#[get("/orders")]
pub async fn list_orders(
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = ListingRequest::from(params.into_inner());
    match orders_service::list_orders(repo.get_ref(), &request) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err, "list orders"),
    }
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    order_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::get_order(repo.get_ref(), order_id.into_inner()) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(&err, "load the order"),
    }
}

#[post("/orders")]
pub async fn create_order(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateOrderForm>,
) -> impl Responder {
    match orders_service::create_order(repo.get_ref(), form) {
        Ok(order) => HttpResponse::Created().json(order),
        Err(err) => error_response(&err, "create the order"),
    }
}

#[patch("/orders/{order_id}/status")]
pub async fn update_order_status(
    order_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateOrderStatusForm>,
) -> impl Responder {
    match orders_service::update_order_status(repo.get_ref(), order_id.into_inner(), form) {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(err) => error_response(&err, "update the order status"),
    }
}

#[delete("/orders/{order_id}")]
pub async fn delete_order(
    order_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match orders_service::delete_order(repo.get_ref(), order_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err, "delete the order"),
    }
}
