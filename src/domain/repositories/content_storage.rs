//! Backing-storage abstraction for raw content resources.

use async_trait::async_trait;
use std::path::PathBuf;

/// Errors raised by a [`ContentStorage`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The storage location itself does not exist.
    #[error("storage location not found: {0}")]
    LocationMissing(PathBuf),

    /// The named resource does not exist.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The resource name would escape the storage location.
    #[error("invalid resource name: {0:?}")]
    InvalidName(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read-only access to named resources in a single storage location.
///
/// Resource names are opaque to the storage; the naming convention
/// (`<identifier>.json`) belongs to [`crate::application::services::ContentStore`].
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FsContentStorage`] - One file per resource in a directory
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentStorage: Send + Sync {
    /// Returns whether the named resource exists. Never fails; unreadable
    /// resources report `false`.
    async fn exists(&self, name: &str) -> bool;

    /// Reads the named resource as raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if the resource is missing, or
    /// [`StorageError::Io`] if it cannot be read.
    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Lists every resource name in the storage location, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::LocationMissing`] if the location is absent,
    /// or [`StorageError::Io`] if it cannot be enumerated.
    async fn list(&self) -> Result<Vec<String>, StorageError>;
}
