//! API route configuration.
//!
//! Addiction content routes are wrapped in the response cache interceptor
//! ([`crate::api::middleware::response_cache`]); health and cache
//! administration routes are always computed fresh.

use crate::api::handlers::{
    addiction_handler, cache_stats_handler, clear_cache_handler, health_check_handler,
    health_handler, search_handler, types_handler,
};
use crate::api::middleware::response_cache;
use crate::infrastructure::cache::ResponseCache;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};
use std::sync::Arc;

/// Catalog and content lookups, cached for the cache's default TTL.
///
/// # Endpoints
///
/// - `GET /types`           - Catalog grouped by category
/// - `GET /{id}`            - Catalog entry with its content
/// - `GET /search/{query}`  - Name / id substring search
pub fn addiction_routes(cache: Arc<ResponseCache>) -> Router<AppState> {
    let duration = cache.default_ttl();

    Router::new()
        .route("/types", get(types_handler))
        .route("/search/{query}", get(search_handler))
        .route("/{id}", get(addiction_handler))
        .route_layer(response_cache::cache_for(cache, duration))
}

/// Response cache administration.
///
/// # Endpoints
///
/// - `GET    /stats`             - Hit/miss counters and memory usage
/// - `DELETE /`                  - Flush everything, or `?pattern=` matches only
pub fn cache_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(cache_stats_handler))
        .route("/", delete(clear_cache_handler))
}

/// Liveness probes.
///
/// # Endpoints
///
/// - `GET /health-check`  - Uptime and timestamp
/// - `GET /health`        - Uptime, timestamp and process memory
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health-check", get(health_check_handler))
        .route("/health", get(health_handler))
}
