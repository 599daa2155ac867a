//! Integration tests for Paperback.
//!
//! These tests are self-contained: each spawns an in-process fixture host
//! (axum, on an ephemeral port) standing in for the static fixture source,
//! and uses a throwaway data directory for the persistent local store.
//!
//! ```bash
//! cargo test -p paperback-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `hydration` - fixture fetch, hydration policy, cache invalidation
//! - `crud_persistence` - CRUD mutations surviving restarts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use url::Url;

use paperback_catalog::Collection;

/// Payloads served by the fixture host. `None` makes the endpoint answer
/// with HTTP 500, simulating a broken fixture source.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub books: Option<Value>,
    pub authors: Option<Value>,
    pub stores: Option<Value>,
}

impl Fixtures {
    /// All three collections served with the given payloads.
    #[must_use]
    pub fn new(books: Value, authors: Value, stores: Value) -> Self {
        Self {
            books: Some(books),
            authors: Some(authors),
            stores: Some(stores),
        }
    }

    /// All three collections served as empty arrays.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(json!([]), json!([]), json!([]))
    }
}

/// An in-process fixture host.
///
/// Serves `/api/{books,authors,stores}.json` from shared, mutable payloads
/// so tests can change what the "remote" returns between fetches. The
/// server task is aborted when the handle drops.
pub struct FixtureServer {
    base_url: Url,
    fixtures: Arc<Mutex<Fixtures>>,
    handle: tokio::task::JoinHandle<()>,
}

impl FixtureServer {
    /// Bind an ephemeral port and start serving `fixtures`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind; tests have no recovery path.
    pub async fn spawn(fixtures: Fixtures) -> Self {
        let fixtures = Arc::new(Mutex::new(fixtures));

        let app = Router::new()
            .route("/api/books.json", get(serve_books))
            .route("/api/authors.json", get(serve_authors))
            .route("/api/stores.json", get(serve_stores))
            .with_state(Arc::clone(&fixtures));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fixture listener");
        let addr = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = format!("http://{addr}/api/")
            .parse()
            .expect("fixture base url");

        Self {
            base_url,
            fixtures,
            handle,
        }
    }

    /// Base URL for a `FixtureClient` pointed at this host.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Replace the payload served for one collection (`None` => HTTP 500).
    pub fn set(&self, collection: Collection, payload: Option<Value>) {
        let mut fixtures = self
            .fixtures
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match collection {
            Collection::Books => fixtures.books = payload,
            Collection::Authors => fixtures.authors = payload,
            Collection::Stores => fixtures.stores = payload,
        }
    }
}

impl Drop for FixtureServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

type FixtureState = State<Arc<Mutex<Fixtures>>>;

async fn serve_books(State(fixtures): FixtureState) -> (StatusCode, Json<Value>) {
    respond(&fixtures, Collection::Books)
}

async fn serve_authors(State(fixtures): FixtureState) -> (StatusCode, Json<Value>) {
    respond(&fixtures, Collection::Authors)
}

async fn serve_stores(State(fixtures): FixtureState) -> (StatusCode, Json<Value>) {
    respond(&fixtures, Collection::Stores)
}

fn respond(fixtures: &Mutex<Fixtures>, collection: Collection) -> (StatusCode, Json<Value>) {
    let fixtures = fixtures
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let payload = match collection {
        Collection::Books => &fixtures.books,
        Collection::Authors => &fixtures.authors,
        Collection::Stores => &fixtures.stores,
    };

    payload.as_ref().map_or_else(
        || {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "fixture unavailable"})),
            )
        },
        |value| (StatusCode::OK, Json(value.clone())),
    )
}

/// A unique throwaway directory for one test's persistent local store.
///
/// Callers remove it at the end of the test; a leaked directory under the
/// system temp dir is harmless.
#[must_use]
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("paperback-it-{}", uuid::Uuid::new_v4()))
}
