//! Storage trait definitions for the domain layer.
//!
//! Traits define the contract; implementations live in
//! `crate::infrastructure::storage`. Mocks are generated via `mockall` for
//! unit tests.

pub mod content_storage;

pub use content_storage::{ContentStorage, StorageError};

#[cfg(test)]
pub use content_storage::MockContentStorage;
