//! Core domain entities.
//!
//! - [`ContentRecord`] - Parsed guide content for one identifier
//! - [`AddictionType`] / [`Category`] - The static catalog the content hangs off
//!
//! Entities are plain data; lookup and caching live in
//! [`crate::application::services`].

pub mod catalog;
pub mod content;

pub use catalog::{AddictionType, CATALOG, Category, CategoryGroup};
pub use content::ContentRecord;
