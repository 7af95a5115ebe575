//! Backing-storage implementations for content resources.

mod fs_storage;

pub use fs_storage::FsContentStorage;
