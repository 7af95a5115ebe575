//! Business logic services for the application layer.

pub mod catalog_service;
pub mod content_store;

pub use catalog_service::{CatalogEntry, CatalogService, SearchResults};
pub use content_store::{ContentLookup, ContentStore};
