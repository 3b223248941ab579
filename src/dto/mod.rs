//! DTOs exposed by the storefront API endpoints.

pub mod listing;
