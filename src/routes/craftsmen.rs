use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::dto::listing::ListingParams;
use crate::forms::craftsmen::CraftsmanForm;
use crate::listing::ListingRequest;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::craftsmen as craftsmen_service;

#[get("/craftsmen")]
pub async fn list_craftsmen(
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = ListingRequest::from(params.into_inner());
    match craftsmen_service::list_craftsmen(repo.get_ref(), &request) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err, "list craftsmen"),
    }
}

#[get("/craftsmen/{craftsman_id}")]
pub async fn show_craftsman(
    craftsman_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match craftsmen_service::get_craftsman(repo.get_ref(), craftsman_id.into_inner()) {
        Ok(craftsman) => HttpResponse::Ok().json(craftsman),
        Err(err) => error_response(&err, "load the craftsman"),
    }
}

#[post("/craftsmen")]
pub async fn create_craftsman(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CraftsmanForm>,
) -> impl Responder {
    match craftsmen_service::create_craftsman(repo.get_ref(), form) {
        Ok(craftsman) => HttpResponse::Created().json(craftsman),
        Err(err) => error_response(&err, "register the craftsman"),
    }
}

#[delete("/craftsmen/{craftsman_id}")]
pub async fn delete_craftsman(
    craftsman_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match craftsmen_service::delete_craftsman(repo.get_ref(), craftsman_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err, "delete the craftsman"),
    }
}
