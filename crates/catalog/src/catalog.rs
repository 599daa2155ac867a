//! Catalog aggregate: the three collection stores plus the fixture client.
//!
//! [`Catalog`] wires the stores to the fixture layer and drives the
//! per-collection hydration path (`Empty -> Hydrating -> Populated`). It is
//! the single object a consumer holds; everything else is reachable through
//! its accessors.

use std::sync::Arc;

use paperback_core::{Author, Book, Store};

use crate::collection::{CollectionStore, HydrationPolicy, HydrationState};
use crate::entity::Collection;
use crate::error::CatalogError;
use crate::fixtures::FixtureClient;
use crate::storage::{StorageError, StoragePort};

/// The three catalog collections and their fixture source.
pub struct Catalog {
    books: CollectionStore<Book>,
    authors: CollectionStore<Author>,
    stores: CollectionStore<Store>,
    fixtures: FixtureClient,
}

impl Catalog {
    /// Open all three collection stores over `storage`, loading persisted
    /// state synchronously, and attach the fixture client for hydration.
    #[must_use]
    pub fn open(
        storage: Arc<dyn StoragePort>,
        fixtures: FixtureClient,
        policy: HydrationPolicy,
    ) -> Self {
        Self {
            books: CollectionStore::open(Arc::clone(&storage), policy),
            authors: CollectionStore::open(Arc::clone(&storage), policy),
            stores: CollectionStore::open(storage, policy),
            fixtures,
        }
    }

    /// Hydrate the books collection from the fixture source.
    ///
    /// Skips the fetch entirely (returning `Ok(false)`) when the hydration
    /// policy would discard the result. On a failed fetch or write-through
    /// the store returns to `Empty`, so a later attempt can retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the write-through fails.
    pub async fn hydrate_books(&mut self) -> Result<bool, CatalogError> {
        if !self.books.hydration_applies() {
            tracing::debug!(collection = %Collection::Books, "already populated, skipping hydration");
            return Ok(false);
        }

        self.books.set_state(HydrationState::Hydrating);
        let fetched = match self.fixtures.fetch_books().await {
            Ok(fetched) => fetched,
            Err(error) => {
                self.books.set_state(HydrationState::Empty);
                return Err(error.into());
            }
        };

        match self.books.set_all(fetched) {
            Ok(applied) => Ok(applied),
            Err(error) => {
                self.books.set_state(HydrationState::Empty);
                Err(error.into())
            }
        }
    }

    /// Hydrate the authors collection from the fixture source.
    ///
    /// Same contract as [`Catalog::hydrate_books`].
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the write-through fails.
    pub async fn hydrate_authors(&mut self) -> Result<bool, CatalogError> {
        if !self.authors.hydration_applies() {
            tracing::debug!(collection = %Collection::Authors, "already populated, skipping hydration");
            return Ok(false);
        }

        self.authors.set_state(HydrationState::Hydrating);
        let fetched = match self.fixtures.fetch_authors().await {
            Ok(fetched) => fetched,
            Err(error) => {
                self.authors.set_state(HydrationState::Empty);
                return Err(error.into());
            }
        };

        match self.authors.set_all(fetched) {
            Ok(applied) => Ok(applied),
            Err(error) => {
                self.authors.set_state(HydrationState::Empty);
                Err(error.into())
            }
        }
    }

    /// Hydrate the stores collection from the fixture source.
    ///
    /// Same contract as [`Catalog::hydrate_books`].
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or the write-through fails.
    pub async fn hydrate_stores(&mut self) -> Result<bool, CatalogError> {
        if !self.stores.hydration_applies() {
            tracing::debug!(collection = %Collection::Stores, "already populated, skipping hydration");
            return Ok(false);
        }

        self.stores.set_state(HydrationState::Hydrating);
        let fetched = match self.fixtures.fetch_stores().await {
            Ok(fetched) => fetched,
            Err(error) => {
                self.stores.set_state(HydrationState::Empty);
                return Err(error.into());
            }
        };

        match self.stores.set_all(fetched) {
            Ok(applied) => Ok(applied),
            Err(error) => {
                self.stores.set_state(HydrationState::Empty);
                Err(error.into())
            }
        }
    }

    /// Hydrate every collection, in [`Collection::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or write-through error; later collections
    /// are not attempted after a failure.
    pub async fn hydrate_all(&mut self) -> Result<(), CatalogError> {
        self.hydrate_books().await?;
        self.hydrate_authors().await?;
        self.hydrate_stores().await?;
        Ok(())
    }

    /// Clear every collection's persisted and in-memory state.
    ///
    /// # Errors
    ///
    /// Returns the first storage error encountered.
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        self.books.clear()?;
        self.authors.clear()?;
        self.stores.clear()?;
        Ok(())
    }

    /// The books collection.
    #[must_use]
    pub const fn books(&self) -> &CollectionStore<Book> {
        &self.books
    }

    /// Mutable handle to the books collection.
    pub fn books_mut(&mut self) -> &mut CollectionStore<Book> {
        &mut self.books
    }

    /// The authors collection.
    #[must_use]
    pub const fn authors(&self) -> &CollectionStore<Author> {
        &self.authors
    }

    /// Mutable handle to the authors collection.
    pub fn authors_mut(&mut self) -> &mut CollectionStore<Author> {
        &mut self.authors
    }

    /// The stores collection.
    #[must_use]
    pub const fn stores(&self) -> &CollectionStore<Store> {
        &self.stores
    }

    /// Mutable handle to the stores collection.
    pub fn stores_mut(&mut self) -> &mut CollectionStore<Store> {
        &mut self.stores
    }

    /// The fixture client, for cache invalidation.
    #[must_use]
    pub const fn fixtures(&self) -> &FixtureClient {
        &self.fixtures
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use paperback_core::{AuthorId, BookId};

    use crate::storage::MemoryStorage;

    fn unreachable_client() -> FixtureClient {
        let base = "http://127.0.0.1:9/api/".parse().expect("static url");
        FixtureClient::new(&base)
    }

    fn sample_book() -> Book {
        Book {
            id: BookId::new("1"),
            author_id: AuthorId::new(1),
            name: "Hyperion".to_owned(),
            isbn: "978-0553283686".to_owned(),
            language: "English".to_owned(),
            page_count: 482,
            format: "Paperback".to_owned(),
            store_id: None,
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_returns_store_to_empty() {
        let storage = Arc::new(MemoryStorage::new());
        let mut catalog = Catalog::open(
            storage,
            unreachable_client(),
            HydrationPolicy::FirstWriteWins,
        );

        let result = catalog.hydrate_books().await;
        assert!(matches!(result, Err(CatalogError::Fixture(_))));
        assert_eq!(catalog.books().state(), HydrationState::Empty);

        // A retry is still possible.
        assert!(catalog.books().hydration_applies());
    }

    #[tokio::test]
    async fn test_populated_collection_skips_the_fetch() {
        let storage = Arc::new(MemoryStorage::new());
        let mut catalog = Catalog::open(
            storage,
            unreachable_client(),
            HydrationPolicy::FirstWriteWins,
        );

        catalog.books_mut().add(sample_book()).unwrap();

        // The client is unreachable, so this only passes because the guard
        // short-circuits before any request is made.
        let applied = catalog.hydrate_books().await.unwrap();
        assert!(!applied);
        assert_eq!(catalog.books().len(), 1);
        assert_eq!(catalog.books().state(), HydrationState::Populated);
    }
}
