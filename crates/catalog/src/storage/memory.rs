//! In-memory storage fake for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::entity::Collection;
use crate::storage::{StorageError, StoragePort};

/// A [`StoragePort`] backed by a process-local map.
///
/// Used by unit tests and anywhere persistence across restarts is not
/// wanted. `fail_writes` simulates a full medium so write-through
/// propagation can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<Collection, String>>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    /// Create an empty in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail, as a quota-exceeded stand-in.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, collection: Collection) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(entries.get(&collection).cloned())
    }

    fn save(&self, collection: Collection, payload: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io {
                collection,
                source: std::io::Error::other("simulated write failure"),
            });
        }

        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(collection, payload.to_owned());
        Ok(())
    }

    fn clear(&self, collection: Collection) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.remove(&collection);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_clear() {
        let storage = MemoryStorage::new();

        assert!(storage.load(Collection::Books).unwrap().is_none());

        storage.save(Collection::Books, "[]").unwrap();
        assert_eq!(storage.load(Collection::Books).unwrap().as_deref(), Some("[]"));

        storage.clear(Collection::Books).unwrap();
        assert!(storage.load(Collection::Books).unwrap().is_none());
    }

    #[test]
    fn test_fail_writes() {
        let storage = MemoryStorage::new();
        storage.fail_writes(true);
        assert!(storage.save(Collection::Books, "[]").is_err());

        storage.fail_writes(false);
        assert!(storage.save(Collection::Books, "[]").is_ok());
    }
}
