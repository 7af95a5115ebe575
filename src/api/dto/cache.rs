//! DTOs for response cache administration.

use serde::{Deserialize, Serialize};

use crate::infrastructure::cache::ClearOutcome;

/// Query string for `DELETE /api/cache`.
#[derive(Debug, Deserialize)]
pub struct ClearCacheParams {
    pub pattern: Option<String>,
}

/// `{"status":"success","cleared":<count|"all">}`
#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub status: &'static str,
    pub cleared: ClearOutcome,
}
