//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/api/health-check`, `/api/health` - Liveness probes
//! - `/api/addictions/*`                - Catalog and content (response-cached)
//! - `/api/cache/*`                     - Response cache administration
//! - anything else                      - `404 API endpoint not found`
//!
//! # Middleware (outermost first)
//!
//! - **Panic recovery** - Handler panics become a `500` envelope
//! - **Tracing** - Structured request/response logging
//! - **Compression** - gzip response bodies
//! - **CORS / security headers** - Origin allow-list, `nosniff`, framing, referrer
//! - **Rate limiting** - Per-IP token bucket with `429` envelope
//! - **Path normalization** - Trailing slash handling (see [`app_service`])

use crate::api::handlers::not_found_handler;
use crate::api::middleware::{panic, rate_limit, security, tracing};
use crate::api::routes::{addiction_routes, cache_routes, health_routes};
use crate::config::Config;
use crate::state::AppState;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting is keyed by the peer socket address, so when
/// `config.rate_limit_enabled` is set the router must be served with
/// connect info (see [`crate::server::run`]).
pub fn app_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .nest(
            "/addictions",
            addiction_routes(state.response_cache.clone()),
        )
        .nest("/cache", cache_routes());

    let mut router = Router::new()
        .nest("/api", api)
        .fallback(not_found_handler)
        .with_state(state);

    if config.rate_limit_enabled {
        router = router
            .layer(rate_limit::layer(config))
            .layer(middleware::map_response(rate_limit::envelope));
    }

    security::harden(router, &config.cors_origins)
        .layer(CompressionLayer::new())
        .layer(tracing::layer())
        .layer(panic::layer(config.environment))
}

/// [`app_router`] with trailing slashes trimmed before routing.
pub fn app_service(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state, config))
}
