//! In-memory collection state with write-through persistence.
//!
//! [`CollectionStore`] is the single authoritative copy of one collection.
//! It loads synchronously from the [`StoragePort`] when opened, and every
//! mutation re-serializes the whole collection back through the port before
//! returning, so in-memory state and persisted state never diverge across a
//! suspension point.
//!
//! The store performs no input validation: uniqueness and referential
//! integrity are deliberately unenforced (consumers validate before calling
//! mutators, and resolve references through [`CollectionIndex`] with an
//! explicit miss). The only way a mutator fails is the write-through
//! itself.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use paperback_core::{Author, AuthorId, Book, BookId, Store, StoreId};

use crate::entity::Entity;
use crate::storage::{StorageError, StoragePort};

/// Rule governing what [`CollectionStore::set_all`] does when the
/// collection already holds data.
///
/// The original guard was an emergent empty-check; here it is a named,
/// testable policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HydrationPolicy {
    /// Local data wins: fixture results apply only to an empty collection.
    /// Once anything is persisted - including across restarts - later
    /// fixture updates are invisible.
    #[default]
    FirstWriteWins,
    /// Fixture results always replace local data.
    PreferRemote,
}

/// Error returned when parsing a [`HydrationPolicy`] from configuration.
#[derive(Debug, thiserror::Error)]
#[error("unknown hydration policy: {0} (expected \"local-first\" or \"remote\")")]
pub struct ParseHydrationPolicyError(String);

impl FromStr for HydrationPolicy {
    type Err = ParseHydrationPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local-first" | "first-write-wins" => Ok(Self::FirstWriteWins),
            "remote" | "prefer-remote" => Ok(Self::PreferRemote),
            other => Err(ParseHydrationPolicyError(other.to_owned())),
        }
    }
}

/// Lifecycle of a collection's one-time hydration.
///
/// `Populated` never transitions back on its own; only
/// [`CollectionStore::clear`] (the external reset) returns a store to
/// `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationState {
    /// Nothing in memory or storage yet.
    Empty,
    /// A fixture fetch is in flight for this collection.
    Hydrating,
    /// The collection holds data (possibly the empty list, if that is what
    /// was hydrated).
    Populated,
}

/// In-memory authoritative state for one entity collection.
pub struct CollectionStore<E: Entity> {
    entries: Vec<E>,
    state: HydrationState,
    policy: HydrationPolicy,
    storage: Arc<dyn StoragePort>,
}

impl<E: Entity> CollectionStore<E> {
    /// Open the store, loading any persisted collection synchronously.
    ///
    /// A missing entry yields an empty collection. So does a payload that
    /// fails to decode or a medium that fails to read - both are logged and
    /// degraded silently, matching the contract that a broken local store
    /// never takes the catalog down.
    #[must_use]
    pub fn open(storage: Arc<dyn StoragePort>, policy: HydrationPolicy) -> Self {
        let entries = load_persisted::<E>(storage.as_ref());
        let state = if entries.is_empty() {
            HydrationState::Empty
        } else {
            HydrationState::Populated
        };

        Self {
            entries,
            state,
            policy,
            storage,
        }
    }

    /// Replace the entire collection, subject to the hydration policy.
    ///
    /// Returns `Ok(true)` and writes through when the replacement applied;
    /// `Ok(false)` without touching storage when [`HydrationPolicy::FirstWriteWins`]
    /// protects existing data.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails; memory is not updated
    /// in that case.
    pub fn set_all(&mut self, entities: Vec<E>) -> Result<bool, StorageError> {
        if self.policy == HydrationPolicy::FirstWriteWins && !self.entries.is_empty() {
            tracing::debug!(
                collection = %E::COLLECTION,
                "collection already populated, fixture data not applied"
            );
            return Ok(false);
        }

        self.write_through_with(&entities)?;
        self.entries = entities;
        self.state = HydrationState::Populated;
        Ok(true)
    }

    /// Append one entity. No uniqueness or referential check is performed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn add(&mut self, entity: E) -> Result<(), StorageError> {
        self.entries.push(entity);
        if let Err(error) = self.write_through() {
            self.entries.pop();
            return Err(error);
        }
        self.state = HydrationState::Populated;
        Ok(())
    }

    /// Replace the first entity whose id matches `entity`.
    ///
    /// Returns `Ok(false)` without writing when no entity matches - a
    /// silent no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn update(&mut self, entity: E) -> Result<bool, StorageError> {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id() == entity.id()) else {
            return Ok(false);
        };

        let previous = std::mem::replace(slot, entity);
        if let Err(error) = self.write_through() {
            // Restore the in-memory copy so it still mirrors storage.
            if let Some(slot) = self
                .entries
                .iter_mut()
                .find(|e| e.id() == previous.id())
            {
                *slot = previous;
            }
            return Err(error);
        }
        Ok(true)
    }

    /// Remove every entity matching `id` (filter semantics) and return how
    /// many were removed. Writes through unconditionally, so deleting an
    /// absent id is an idempotent persisted no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    pub fn delete(&mut self, id: &E::Id) -> Result<usize, StorageError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id() != id);
        let removed = before - self.entries.len();

        self.write_through()?;
        Ok(removed)
    }

    /// Remove the persisted value and empty the in-memory collection.
    ///
    /// This is the external reset: the only path from `Populated` back to
    /// `Empty`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage medium rejects the removal.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.storage.clear(E::COLLECTION)?;
        self.entries.clear();
        self.state = HydrationState::Empty;
        Ok(())
    }

    /// Current collection contents, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> &[E] {
        &self.entries
    }

    /// Number of entities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current hydration lifecycle state.
    #[must_use]
    pub const fn state(&self) -> HydrationState {
        self.state
    }

    /// The policy this store was opened with.
    #[must_use]
    pub const fn policy(&self) -> HydrationPolicy {
        self.policy
    }

    /// Whether a hydration attempt would currently apply, so callers can
    /// skip the fetch entirely when its result would be discarded.
    #[must_use]
    pub fn hydration_applies(&self) -> bool {
        self.policy == HydrationPolicy::PreferRemote || self.entries.is_empty()
    }

    /// Build an id-indexed view of the current snapshot.
    ///
    /// The index borrows from the store; rebuild it after a mutation. When
    /// duplicate ids exist (the catalog never checks), the first occurrence
    /// wins, matching linear-scan lookup semantics.
    #[must_use]
    pub fn index(&self) -> CollectionIndex<'_, E> {
        CollectionIndex::build(&self.entries)
    }

    pub(crate) fn set_state(&mut self, state: HydrationState) {
        self.state = state;
    }

    fn write_through(&self) -> Result<(), StorageError> {
        self.write_through_with(&self.entries)
    }

    fn write_through_with(&self, entries: &[E]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(entries)?;
        self.storage.save(E::COLLECTION, &payload)
    }
}

// =============================================================================
// Id assignment
// =============================================================================

impl CollectionStore<Author> {
    /// Next author id: max existing + 1, or 1 for an empty collection.
    #[must_use]
    pub fn next_id(&self) -> AuthorId {
        AuthorId::new(next_numeric_id(self.entries.iter().map(|a| a.id.as_i32())))
    }
}

impl CollectionStore<Store> {
    /// Next store id: max existing + 1, or 1 for an empty collection.
    #[must_use]
    pub fn next_id(&self) -> StoreId {
        StoreId::new(next_numeric_id(self.entries.iter().map(|s| s.id.as_i32())))
    }
}

impl CollectionStore<Book> {
    /// Next book id: textual successor of the numeric maximum.
    ///
    /// Book ids are strings on the wire; ids that do not parse as integers
    /// are ignored by the scan. An empty (or wholly non-numeric) collection
    /// yields `"1"`.
    #[must_use]
    pub fn next_id(&self) -> BookId {
        let max = self
            .entries
            .iter()
            .filter_map(|b| b.id.as_int().ok())
            .max()
            .unwrap_or(0);
        BookId::from(max + 1)
    }
}

fn next_numeric_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

// =============================================================================
// Indexed lookup
// =============================================================================

/// Id-to-entity map built once per snapshot.
///
/// Replaces per-row linear scans when resolving references across
/// collections (e.g. author names for a book table). A missing id is an
/// explicit `None`, never a crash.
pub struct CollectionIndex<'a, E: Entity> {
    by_id: HashMap<&'a E::Id, &'a E>,
}

impl<'a, E: Entity> CollectionIndex<'a, E> {
    fn build(entries: &'a [E]) -> Self {
        let mut by_id = HashMap::with_capacity(entries.len());
        for entity in entries {
            // First occurrence wins on duplicate ids.
            by_id.entry(entity.id()).or_insert(entity);
        }
        Self { by_id }
    }

    /// Look up an entity by id.
    #[must_use]
    pub fn get(&self, id: &E::Id) -> Option<&'a E> {
        self.by_id.get(id).copied()
    }

    /// Number of distinct ids in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn load_persisted<E: Entity>(storage: &dyn StoragePort) -> Vec<E> {
    let raw = match storage.load(E::COLLECTION) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::error!(
                collection = %E::COLLECTION,
                %error,
                "failed to read persisted collection, starting empty"
            );
            return Vec::new();
        }
    };

    match raw {
        None => Vec::new(),
        Some(payload) => serde_json::from_str(&payload).unwrap_or_else(|error| {
            tracing::error!(
                collection = %E::COLLECTION,
                %error,
                "discarding corrupt persisted collection"
            );
            Vec::new()
        }),
    }
}
