pub mod craftsmen;
pub mod errors;
pub mod orders;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
