//! File-backed storage: one JSON file per collection under a data directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::entity::Collection;
use crate::storage::{StorageError, StoragePort};

/// Stores each collection as `<root>/<key>.json`.
///
/// The directory is created lazily on first save, so pointing at a
/// not-yet-existing location is fine.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this storage writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.key()))
    }
}

impl StoragePort for FileStorage {
    fn load(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(collection)) {
            Ok(payload) => Ok(Some(payload)),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { collection, source }),
        }
    }

    fn save(&self, collection: Collection, payload: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .and_then(|()| fs::write(self.path(collection), payload))
            .map_err(|source| StorageError::Io { collection, source })
    }

    fn clear(&self, collection: Collection) -> Result<(), StorageError> {
        match fs::remove_file(self.path(collection)) {
            Ok(()) => Ok(()),
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { collection, source }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_storage() -> FileStorage {
        let root = std::env::temp_dir().join(format!("paperback-storage-{}", uuid::Uuid::new_v4()));
        FileStorage::new(root)
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let storage = temp_storage();
        assert!(storage.load(Collection::Books).unwrap().is_none());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let storage = temp_storage();

        storage.save(Collection::Authors, "[{\"id\":1}]").unwrap();
        let loaded = storage.load(Collection::Authors).unwrap();
        assert_eq!(loaded.as_deref(), Some("[{\"id\":1}]"));

        // Other collections stay untouched
        assert!(storage.load(Collection::Stores).unwrap().is_none());

        fs::remove_dir_all(storage.root()).unwrap();
    }

    #[test]
    fn test_save_replaces_previous_value() {
        let storage = temp_storage();

        storage.save(Collection::Books, "[1]").unwrap();
        storage.save(Collection::Books, "[]").unwrap();
        assert_eq!(storage.load(Collection::Books).unwrap().as_deref(), Some("[]"));

        fs::remove_dir_all(storage.root()).unwrap();
    }

    #[test]
    fn test_clear_is_idempotent() {
        let storage = temp_storage();

        storage.save(Collection::Stores, "[]").unwrap();
        storage.clear(Collection::Stores).unwrap();
        assert!(storage.load(Collection::Stores).unwrap().is_none());

        // Clearing an already-missing entry succeeds
        storage.clear(Collection::Stores).unwrap();

        fs::remove_dir_all(storage.root()).unwrap();
    }
}
