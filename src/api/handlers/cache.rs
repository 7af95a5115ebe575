//! Handlers for response cache introspection and invalidation.

use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

use crate::api::dto::ApiResponse;
use crate::api::dto::cache::{ClearCacheParams, ClearCacheResponse};
use crate::infrastructure::cache::CacheStats;
use crate::state::AppState;

/// Reports response cache counters and process memory.
///
/// # Endpoint
///
/// `GET /api/cache/stats`
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<ApiResponse<CacheStats>> {
    Json(ApiResponse::success(state.response_cache.stats()))
}

/// Invalidates cached responses.
///
/// # Endpoint
///
/// `DELETE /api/cache?pattern=<substring>`
///
/// With `pattern`, removes every key containing it (keys look like
/// `GET:/api/addictions/nicotine`) and returns the count. Without it, flushes
/// everything and returns `"all"`.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    Query(params): Query<ClearCacheParams>,
) -> Json<ClearCacheResponse> {
    let cleared = state.response_cache.clear(params.pattern.as_deref());
    info!(pattern = ?params.pattern, ?cleared, "Response cache invalidated");

    Json(ClearCacheResponse {
        status: "success",
        cleared,
    })
}
