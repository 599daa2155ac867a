//! Persistent local store for collection payloads.
//!
//! [`StoragePort`] is the injected persistence seam: one serialized JSON
//! array per collection, addressed by the collection's key (`"books"`,
//! `"authors"`, `"stores"`). The port moves raw payloads; decoding (and
//! tolerance of corrupt payloads) happens at the collection-store boundary.
//!
//! Two implementations ship with the crate: [`FileStorage`] for real use
//! and [`MemoryStorage`] as a test fake.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::entity::Collection;

/// Errors that can occur in the persistent local store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying I/O failed (read, write, or delete).
    #[error("storage I/O error for {collection}: {source}")]
    Io {
        /// Collection whose payload was being accessed.
        collection: Collection,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A collection failed to serialize for write-through.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value persistence for serialized collections.
///
/// Operations are synchronous: a mutation's write-through completes before
/// the mutation returns. `load` distinguishes only "present" from "absent";
/// a present-but-malformed payload is the caller's problem to tolerate.
pub trait StoragePort: Send + Sync {
    /// Load the raw payload stored for `collection`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium cannot be read. A missing
    /// entry is `Ok(None)`, not an error.
    fn load(&self, collection: Collection) -> Result<Option<String>, StorageError>;

    /// Store `payload` as the value for `collection`, replacing any
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (e.g. the medium is full); the
    /// caller propagates it unchanged.
    fn save(&self, collection: Collection, payload: &str) -> Result<(), StorageError>;

    /// Remove the stored value for `collection`. Removing an absent entry
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal itself fails.
    fn clear(&self, collection: Collection) -> Result<(), StorageError>;
}
