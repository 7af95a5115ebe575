//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::application::services::{CatalogService, ContentStore};
use crate::infrastructure::cache::ResponseCache;
use crate::infrastructure::storage::FsContentStorage;

/// Handles to the process-lifetime services.
///
/// Created once in [`crate::server::run`] and cloned cheaply into every
/// request; the caches are dropped when the last clone goes away at shutdown.
#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentStore<FsContentStorage>>,
    pub catalog: Arc<CatalogService>,
    pub response_cache: Arc<ResponseCache>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        content: Arc<ContentStore<FsContentStorage>>,
        catalog: Arc<CatalogService>,
        response_cache: Arc<ResponseCache>,
    ) -> Self {
        Self {
            content,
            catalog,
            response_cache,
            started_at: Instant::now(),
        }
    }

    /// Whole seconds since the state was created.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
