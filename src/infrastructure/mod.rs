//! Infrastructure layer: concrete storage and in-process caching.
//!
//! # Modules
//!
//! - [`cache`] - Time-expiring HTTP response cache and its sweeper
//! - [`storage`] - Filesystem implementation of [`crate::domain::repositories::ContentStorage`]

pub mod cache;
pub mod storage;
