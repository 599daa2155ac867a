//! Command implementations.
//!
//! Each admin and browse command opens the catalog, attempts hydration
//! (degrading to local data with a warning when the fixture source is
//! unreachable, the way the original UI degraded to an error banner), and
//! performs its work. Form-level validation lives here, before any catalog
//! mutator is invoked - the catalog itself accepts whatever it is given.

pub mod authors;
pub mod books;
pub mod shop;
pub mod storage;
pub mod stores;
pub mod sync;

use std::sync::Arc;

use thiserror::Error;

use paperback_core::EmailError;
use paperback_catalog::{
    Catalog, CatalogError, Collection, FileStorage, FixtureClient, StorageError, StoragePort,
};

use crate::config::Config;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required form field was missing or blank.
    #[error("{field} is required")]
    MissingField {
        /// Field name as shown to the user.
        field: &'static str,
    },

    /// Page count must be positive.
    #[error("page count must be a positive number")]
    NonPositivePageCount,

    /// Email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// A browse view referenced an id that does not exist.
    #[error("no {collection} entry with id {id}")]
    NotFound {
        /// Collection searched.
        collection: Collection,
        /// Identifier as entered.
        id: String,
    },

    /// Hydration failed hard (only `sync` treats this as fatal).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The persistent local store rejected a write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Open the catalog over the configured data directory and fixture source.
pub(crate) fn open_catalog(config: &Config) -> Catalog {
    let storage: Arc<dyn StoragePort> = Arc::new(FileStorage::new(&config.data_dir));
    let fixtures = FixtureClient::new(&config.fixture_url);
    Catalog::open(storage, fixtures, config.hydration)
}

/// Open the catalog and hydrate it, degrading to local data on failure.
///
/// Browse and CRUD commands want whatever state is available; an
/// unreachable fixture source means empty or stale collections, not a
/// failed command.
pub(crate) async fn open_and_hydrate(config: &Config) -> Catalog {
    let mut catalog = open_catalog(config);
    if let Err(error) = catalog.hydrate_all().await {
        tracing::warn!(%error, "fixture hydration failed, showing local data only");
    }
    catalog
}

/// Require a non-blank form field, trimming surrounding whitespace.
pub(crate) fn required_field(value: &str, field: &'static str) -> Result<String, CommandError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CommandError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Require a positive page count.
pub(crate) fn positive_pages(pages: u32) -> Result<u32, CommandError> {
    if pages == 0 {
        return Err(CommandError::NonPositivePageCount);
    }
    Ok(pages)
}

/// Case-insensitive name filter used by the list commands.
pub(crate) fn matches_search(name: &str, search: Option<&str>) -> bool {
    search.is_none_or(|q| name.to_lowercase().contains(&q.to_lowercase()))
}
