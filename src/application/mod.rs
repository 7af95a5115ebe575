//! Application layer services.
//!
//! - [`services::content_store::ContentStore`] - Lazily-cached content lookups over storage
//! - [`services::catalog_service::CatalogService`] - Category catalog lookup and search

pub mod services;
