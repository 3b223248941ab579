use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        craftsman::{Craftsman, NewCraftsman},
        order::{NewOrder, Order},
        product::{NewProduct, Product, UpdateProduct},
        types::OrderStatus,
    },
    repository::errors::RepositoryResult,
};

pub mod craftsman;
pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod order;
pub mod product;

/// Diesel-backed repository shared by every handler through `web::Data`.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Converts listing bounds into SQLite `LIMIT`/`OFFSET` values.
fn sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
}

pub trait OrderWriter {
    fn create_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(&self, id: i32, status: OrderStatus) -> RepositoryResult<Order>;
    fn delete_order(&self, id: i32) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
    fn set_product_image(&self, id: i32, image_url: &str) -> RepositoryResult<Product>;
    fn delete_product(&self, id: i32) -> RepositoryResult<()>;
}

pub trait CraftsmanReader {
    fn get_craftsman_by_id(&self, id: i32) -> RepositoryResult<Option<Craftsman>>;
}

pub trait CraftsmanWriter {
    fn create_craftsman(&self, new_craftsman: &NewCraftsman) -> RepositoryResult<Craftsman>;
    fn delete_craftsman(&self, id: i32) -> RepositoryResult<()>;
}
