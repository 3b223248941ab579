//! Request bodies accepted by the write endpoints.

pub mod craftsmen;
pub mod orders;
pub mod products;
