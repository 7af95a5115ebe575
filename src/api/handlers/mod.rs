//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod addictions;
pub mod cache;
pub mod fallback;
pub mod health;

pub use addictions::{addiction_handler, search_handler, types_handler};
pub use cache::{cache_stats_handler, clear_cache_handler};
pub use fallback::not_found_handler;
pub use health::{health_check_handler, health_handler};
