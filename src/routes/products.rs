use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::listing::ListingParams;
use crate::forms::products::{ProductForm, UploadImageForm};
use crate::imaging::{ImageProcessor, UploadStore};
use crate::listing::ListingRequest;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::{ServiceError, products as products_service};

#[get("/products")]
pub async fn list_products(
    params: web::Query<ListingParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = ListingRequest::from(params.into_inner());
    match products_service::list_products(repo.get_ref(), &request) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err, "list products"),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::get_product(repo.get_ref(), product_id.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err, "load the product"),
    }
}

#[post("/products")]
pub async fn create_product(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    match products_service::create_product(repo.get_ref(), form) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response(&err, "create the product"),
    }
}

#[put("/products/{product_id}")]
pub async fn update_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProductForm>,
) -> impl Responder {
    match products_service::update_product(repo.get_ref(), product_id.into_inner(), form) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response(&err, "update the product"),
    }
}

#[delete("/products/{product_id}")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products_service::delete_product(repo.get_ref(), product_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&err, "delete the product"),
    }
}

#[post("/products/{product_id}/image")]
pub async fn upload_product_image(
    product_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    processor: web::Data<dyn ImageProcessor>,
    store: web::Data<UploadStore>,
    MultipartForm(form): MultipartForm<UploadImageForm>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let repo = repo.get_ref().clone();
    let processor = processor.into_inner();
    let store = store.into_inner();

    // Decoding and resizing are CPU-bound; keep them off the worker thread.
    let result = web::block(move || {
        let bytes = std::fs::read(form.image.file.path())
            .map_err(|err| ServiceError::Upload(err.to_string()))?;
        products_service::attach_product_image(
            &repo,
            processor.as_ref(),
            store.as_ref(),
            product_id,
            &bytes,
        )
    })
    .await;

    match result {
        Ok(Ok(product)) => HttpResponse::Ok().json(product),
        Ok(Err(err)) => error_response(&err, "store the product image"),
        Err(err) => error_response(
            &ServiceError::Upload(err.to_string()),
            "store the product image",
        ),
    }
}
