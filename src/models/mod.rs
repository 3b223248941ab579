//! Database models shared across the storefront repository.

pub mod config;
pub mod craftsman;
pub mod order;
pub mod product;
