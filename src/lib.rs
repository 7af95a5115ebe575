//! # Rehab API
//!
//! HTTP API serving categorized addiction-recovery guides, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Content records, the static catalog and the storage trait
//! - **Application Layer** ([`application`]) - Content cache and catalog search
//! - **Infrastructure Layer** ([`infrastructure`]) - Filesystem storage and the response cache
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Content files parsed once and shared for the life of the process
//! - Response cache with per-entry expiry, hit/miss statistics and pattern invalidation
//! - Per-IP rate limiting, CORS allow-list and security headers
//! - Structured logging in text or JSON
//!
//! ## Quick Start
//!
//! ```bash
//! export CONTENT_DIR="content/addictions"
//! export PORT=5000
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CatalogService, ContentLookup, ContentStore};
    pub use crate::domain::entities::{AddictionType, Category, ContentRecord};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::ResponseCache;
    pub use crate::infrastructure::storage::FsContentStorage;
    pub use crate::state::AppState;
}
