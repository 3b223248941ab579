//! Domain aggregates exposed by the storefront service layer.

pub mod craftsman;
pub mod order;
pub mod product;
pub mod types;
