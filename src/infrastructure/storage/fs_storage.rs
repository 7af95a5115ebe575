//! Filesystem-backed content storage.

use crate::domain::repositories::{ContentStorage, StorageError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Content storage reading one file per resource from a single directory.
///
/// Resource names map directly to file names inside `root`; names that could
/// escape the directory are rejected.
#[derive(Debug, Clone)]
pub struct FsContentStorage {
    root: PathBuf,
}

impl FsContentStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory this storage reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.contains(['/', '\\'])
            || name == "."
            || name == ".."
        {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ContentStorage for FsContentStorage {
    async fn exists(&self, name: &str) -> bool {
        let Ok(path) = self.resolve(name) else {
            return false;
        };
        matches!(tokio::fs::metadata(&path).await, Ok(meta) if meta.is_file())
    }

    async fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(name)?;
        debug!(path = %path.display(), "Reading content resource");

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(name.to_string()),
            _ => StorageError::Io(e),
        })
    }

    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => StorageError::LocationMissing(self.root.clone()),
                _ => StorageError::Io(e),
            })?;

        let mut names = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn storage_with(files: &[(&str, &str)]) -> (TempDir, FsContentStorage) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let storage = FsContentStorage::new(dir.path());
        (dir, storage)
    }

    #[tokio::test]
    async fn test_exists_and_read() {
        let (_dir, storage) = storage_with(&[("alcohol.json", r#"{"title":"A"}"#)]);

        assert!(storage.exists("alcohol.json").await);
        assert!(!storage.exists("coffee.json").await);

        let bytes = storage.read("alcohol.json").await.unwrap();
        assert_eq!(bytes, br#"{"title":"A"}"#);
    }

    #[tokio::test]
    async fn test_read_missing_resource_is_not_found() {
        let (_dir, storage) = storage_with(&[]);

        let err = storage.read("ghost.json").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(name) if name == "ghost.json"));
    }

    #[tokio::test]
    async fn test_rejects_names_outside_root() {
        let (_dir, storage) = storage_with(&[]);

        assert!(!storage.exists("../secret.json").await);
        assert!(matches!(
            storage.read("..").await,
            Err(StorageError::InvalidName(_))
        ));
    }

    #[tokio::test]
    async fn test_list_returns_sorted_files_only() {
        let (dir, storage) = storage_with(&[("b.json", "{}"), ("a.json", "{}"), ("notes.txt", "")]);
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let names = storage.list().await.unwrap();
        assert_eq!(names, vec!["a.json", "b.json", "notes.txt"]);
    }

    #[tokio::test]
    async fn test_list_missing_location() {
        let dir = TempDir::new().unwrap();
        let storage = FsContentStorage::new(dir.path().join("absent"));

        assert!(matches!(
            storage.list().await,
            Err(StorageError::LocationMissing(_))
        ));
    }
}
