//! Cache types for fixture responses.

use paperback_core::{Author, Book, Store};

/// Cached value per fixture resource.
///
/// Keyed by [`Collection`](crate::Collection); each entry holds the full
/// typed collection exactly as the fixture endpoint returned it.
#[derive(Debug, Clone)]
pub enum CachedCollection {
    Books(Vec<Book>),
    Authors(Vec<Author>),
    Stores(Vec<Store>),
}
