//! Construction-materials storefront backend: paginated listings and CRUD
//! over orders, products and craftsmen.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, http::header, middleware, web};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::imaging::{UploadStore, select_processor};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
#[cfg(feature = "server")]
pub mod imaging;
pub mod listing;
pub mod models;
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
pub mod schema;
pub mod services;

/// CORS policy built from the configured allow-list. A `*` entry allows any
/// origin.
#[cfg(feature = "server")]
pub fn cors_policy(allowed_origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }

    allowed_origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let store = UploadStore::new(&server_config.upload_dir, &server_config.public_url)?;
    let processor = web::Data::from(select_processor(&server_config));
    let store = web::Data::new(store);

    let bind_address = (server_config.address.clone(), server_config.port);
    let server_config = Arc::new(server_config);

    log::info!(
        "Starting storefront API on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(cors_policy(&server_config.cors_allowed_origins))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new(UploadStore::ROUTE, store.dir()))
            .configure(routes::configure)
            .app_data(routes::json_config())
            .app_data(web::Data::new(repo.clone()))
            .app_data(processor.clone())
            .app_data(store.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
