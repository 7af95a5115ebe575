//! DTOs for health endpoints.

use serde::Serialize;

/// Liveness probe response for `GET /api/health-check`.
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub uptime: u64,
}

/// Detailed health response for `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub uptime: u64,
    pub timestamp: String,
    pub memory: MemoryUsage,
}

/// Process memory in megabytes. `used` is resident size, `total` is virtual size.
#[derive(Debug, Serialize)]
pub struct MemoryUsage {
    pub used: Option<f64>,
    pub total: Option<f64>,
    pub unit: &'static str,
}
