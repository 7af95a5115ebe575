//! Domain layer: content entities, the category catalog and the storage contract.
//!
//! - [`entities`] - [`entities::ContentRecord`] and the static catalog
//! - [`repositories`] - [`repositories::ContentStorage`] backing-storage trait
//!
//! The domain layer has no dependency on HTTP or on the filesystem.

pub mod entities;
pub mod repositories;
