//! Handlers for health endpoints.

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::api::dto::health::{HealthCheckResponse, HealthResponse, MemoryUsage};
use crate::state::AppState;
use crate::utils::memory::MemorySnapshot;

/// Liveness probe.
///
/// # Endpoint
///
/// `GET /api/health-check`
///
/// # Response
///
/// ```json
/// {
///   "status": "success",
///   "message": "My Rehab Centre API is running",
///   "timestamp": "2026-01-01T12:00:00.000Z",
///   "uptime": 42
/// }
/// ```
pub async fn health_check_handler(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "success",
        message: "My Rehab Centre API is running",
        timestamp: now_rfc3339(),
        uptime: state.uptime_seconds(),
    })
}

/// Health report including process memory.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// `memory.used` / `memory.total` are `null` where the platform does not
/// expose process memory.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let memory = MemorySnapshot::capture();

    Json(HealthResponse {
        status: "success",
        message: "API is healthy",
        uptime: state.uptime_seconds(),
        timestamp: now_rfc3339(),
        memory: MemoryUsage {
            used: memory.rss_mb(),
            total: memory.virtual_mb(),
            unit: "MB",
        },
    })
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
