//! The collection registry and the entity seam.
//!
//! [`Collection`] names the three catalog collections and carries their
//! external contract: the storage key and the fixture endpoint. [`Entity`]
//! ties a record type to its collection so [`CollectionStore`](crate::CollectionStore)
//! can stay generic.

use core::fmt;
use std::hash::Hash;

use serde::Serialize;
use serde::de::DeserializeOwned;

use paperback_core::{Author, AuthorId, Book, BookId, Store, StoreId};

/// One of the three catalog collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Books,
    Authors,
    Stores,
}

impl Collection {
    /// All collections, in hydration order.
    pub const ALL: [Self; 3] = [Self::Books, Self::Authors, Self::Stores];

    /// Storage key for this collection. Also the fixture file stem.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Authors => "authors",
            Self::Stores => "stores",
        }
    }

    /// Fixture endpoint path, relative to the fixture base URL.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Books => "books.json",
            Self::Authors => "authors.json",
            Self::Stores => "stores.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A record type held by one catalog collection.
///
/// Implemented for [`Book`], [`Author`], and [`Store`]; the trait exists so
/// the collection store, persistence, and index code is written once.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type for this entity.
    type Id: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync;

    /// The collection this entity belongs to.
    const COLLECTION: Collection;

    /// The entity's identifier.
    fn id(&self) -> &Self::Id;
}

impl Entity for Book {
    type Id = BookId;

    const COLLECTION: Collection = Collection::Books;

    fn id(&self) -> &BookId {
        &self.id
    }
}

impl Entity for Author {
    type Id = AuthorId;

    const COLLECTION: Collection = Collection::Authors;

    fn id(&self) -> &AuthorId {
        &self.id
    }
}

impl Entity for Store {
    type Id = StoreId;

    const COLLECTION: Collection = Collection::Stores;

    fn id(&self) -> &StoreId {
        &self.id
    }
}
