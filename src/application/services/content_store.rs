//! Lazily-populated content cache over a [`ContentStorage`] backend.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::domain::entities::ContentRecord;
use crate::domain::repositories::{ContentStorage, StorageError};

/// Suffix appended to an identifier to name its storage resource.
pub const CONTENT_SUFFIX: &str = ".json";

/// Outcome of a content lookup.
///
/// A missing or unreadable resource is an expected result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentLookup {
    Found(Arc<ContentRecord>),
    Absent,
}

impl ContentLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn into_option(self) -> Option<Arc<ContentRecord>> {
        match self {
            Self::Found(record) => Some(record),
            Self::Absent => None,
        }
    }
}

/// Content store that reads each identifier from storage at most once.
///
/// Successfully parsed records stay cached until [`Self::clear`]. Failed reads
/// and parse errors are logged and reported as [`ContentLookup::Absent`]
/// without being cached, so the next lookup retries.
///
/// Identifiers are expected to be normalized by the caller
/// (see [`crate::utils::identifier::normalize_identifier`]).
pub struct ContentStore<S: ContentStorage> {
    storage: Arc<S>,
    records: DashMap<String, Arc<ContentRecord>>,
}

impl<S: ContentStorage> ContentStore<S> {
    /// Creates an empty store over `storage`.
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            records: DashMap::new(),
        }
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Returns the record for `id`, reading storage only on the first
    /// successful lookup.
    pub async fn load(&self, id: &str) -> ContentLookup {
        if let Some(record) = self.records.get(id) {
            debug!(id, "Content cache HIT");
            return ContentLookup::Found(Arc::clone(record.value()));
        }

        let resource = resource_name(id);

        if !self.storage.exists(&resource).await {
            warn!(id, %resource, "Content resource not found");
            return ContentLookup::Absent;
        }

        let bytes = match self.storage.read(&resource).await {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(_)) => {
                warn!(id, %resource, "Content resource disappeared before read");
                return ContentLookup::Absent;
            }
            Err(e) => {
                error!(id, %resource, error = %e, "Failed to read content resource");
                return ContentLookup::Absent;
            }
        };

        match ContentRecord::from_slice(&bytes) {
            Ok(record) => {
                debug!(id, "Content cache MISS, loaded from storage");
                // Concurrent first loads converge on whichever record landed first.
                let record = self
                    .records
                    .entry(id.to_string())
                    .or_insert_with(|| Arc::new(record))
                    .value()
                    .clone();
                ContentLookup::Found(record)
            }
            Err(e) => {
                error!(id, %resource, error = %e, "Failed to parse content resource");
                ContentLookup::Absent
            }
        }
    }

    /// Lists identifiers that have a resource in storage, sorted.
    ///
    /// Returns an empty list when the storage location is missing or unreadable.
    pub async fn list_available_ids(&self) -> Vec<String> {
        match self.storage.list().await {
            Ok(names) => {
                let mut ids: Vec<String> = names
                    .iter()
                    .filter_map(|name| name.strip_suffix(CONTENT_SUFFIX))
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
                    .collect();
                ids.sort();
                ids
            }
            Err(e @ StorageError::LocationMissing(_)) => {
                warn!(error = %e, "Content directory not found");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "Failed to list content directory");
                Vec::new()
            }
        }
    }

    /// Whether storage holds a resource for `id`, parsable or not.
    ///
    /// Does not touch the record cache.
    pub async fn has_resource(&self, id: &str) -> bool {
        self.storage.exists(&resource_name(id)).await
    }

    /// Drops every cached record; subsequent loads re-read storage.
    pub fn clear(&self) {
        let dropped = self.records.len();
        self.records.clear();
        debug!(dropped, "Content cache cleared");
    }

    /// Number of records currently cached.
    pub fn cached_len(&self) -> usize {
        self.records.len()
    }
}

fn resource_name(id: &str) -> String {
    format!("{id}{CONTENT_SUFFIX}")
}
