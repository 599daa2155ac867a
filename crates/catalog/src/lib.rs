//! Paperback Catalog - collection state management.
//!
//! This crate is the data layer of Paperback. It owns three entity
//! collections (books, authors, stores), seeds them from read-only JSON
//! fixtures served over HTTP, and mirrors every mutation write-through to a
//! persistent local key-value store so edits survive process restarts.
//!
//! # Architecture
//!
//! - [`fixtures::FixtureClient`] - read-through cached client for the
//!   fixture endpoints (`books.json`, `authors.json`, `stores.json`)
//! - [`storage::StoragePort`] - injected persistence seam, with a
//!   file-backed implementation and an in-memory fake for tests
//! - [`collection::CollectionStore`] - the in-memory authoritative state
//!   for one collection, with write-through CRUD mutators
//! - [`catalog::Catalog`] - aggregate wiring the three stores to the
//!   fixture client and driving hydration
//!
//! # Hydration
//!
//! A collection hydrates at most once: if the local store already holds
//! data, the fixture result is discarded under the default
//! [`collection::HydrationPolicy::FirstWriteWins`] rule. Local edits
//! therefore win over later fixture updates unless the policy is switched
//! to [`collection::HydrationPolicy::PreferRemote`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use paperback_catalog::{Catalog, FileStorage, FixtureClient, HydrationPolicy};
//!
//! let storage = Arc::new(FileStorage::new("./data"));
//! let fixtures = FixtureClient::new(&"http://localhost:3000/api/".parse()?);
//! let mut catalog = Catalog::open(storage, fixtures, HydrationPolicy::default());
//!
//! catalog.hydrate_all().await?;
//! for book in catalog.books().snapshot() {
//!     println!("{}", book.name);
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod collection;
pub mod entity;
pub mod error;
pub mod fixtures;
pub mod storage;

pub use catalog::Catalog;
pub use collection::{CollectionIndex, CollectionStore, HydrationPolicy, HydrationState};
pub use entity::{Collection, Entity};
pub use error::CatalogError;
pub use fixtures::{FixtureClient, FixtureError};
pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort};
