//! Top-level catalog error type.

use thiserror::Error;

use crate::fixtures::FixtureError;
use crate::storage::StorageError;

/// Errors surfaced by [`Catalog`](crate::Catalog) operations.
///
/// The two sources mirror the system's failure taxonomy: fetch failures
/// from the fixture layer (no retry, caller decides) and write-through
/// failures from the persistence layer (propagated unchanged from the
/// mutating call).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Fixture fetch failed (network, HTTP status, or parse).
    #[error("fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Persistent local store rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::Fixture(FixtureError::Status {
            collection: crate::Collection::Books,
            status: 500,
        });
        assert_eq!(
            err.to_string(),
            "fixture error: fixture endpoint for books returned HTTP 500"
        );
    }
}
