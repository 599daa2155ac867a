//! Fixture endpoint client with per-resource caching.
//!
//! The fixture source is a read-only HTTP collaborator serving one JSON
//! array per collection (`books.json`, `authors.json`, `stores.json`).
//! Responses are cached in memory with `moka`, keyed by [`Collection`], so
//! repeated fetches within a session hit the cache until it is explicitly
//! invalidated. Entries carry no TTL: the fixture data is static, and
//! invalidation is the only refresh path.
//!
//! Failures are not retried and carry no timeout; the caller decides what
//! a failed hydration means.

mod cache;

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use paperback_core::{Author, Book, Store};

use crate::entity::Collection;
use cache::CachedCollection;

/// Largest response-body prefix included in error logs.
const LOG_BODY_LIMIT: usize = 500;

/// Errors that can occur when fetching fixture data.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("fixture endpoint for {collection} returned HTTP {status}")]
    Status {
        /// Collection whose endpoint failed.
        collection: Collection,
        /// Response status code.
        status: u16,
    },

    /// Response body was not a valid collection payload.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot be joined with an endpoint path.
    #[error("invalid fixture URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the fixture endpoints.
///
/// Cheaply cloneable; all clones share one HTTP connection pool and one
/// response cache.
#[derive(Clone)]
pub struct FixtureClient {
    inner: Arc<FixtureClientInner>,
}

struct FixtureClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<Collection, CachedCollection>,
}

impl FixtureClient {
    /// Create a new fixture client rooted at `base_url`.
    ///
    /// The base URL should end with a trailing slash (e.g.
    /// `http://localhost:3000/api/`) so endpoint paths join under it.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(Collection::ALL.len() as u64)
            .build();

        Self {
            inner: Arc::new(FixtureClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.clone(),
                cache,
            }),
        }
    }

    /// Fetch one collection endpoint, bypassing the cache.
    async fn fetch_raw<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, FixtureError> {
        let endpoint = self.inner.base_url.join(collection.endpoint())?;

        let response = self.inner.client.get(endpoint).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                %collection,
                status = %status,
                body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "fixture endpoint returned non-success status"
            );
            return Err(FixtureError::Status {
                collection,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|error| {
            tracing::error!(
                %collection,
                %error,
                body = %body.chars().take(LOG_BODY_LIMIT).collect::<String>(),
                "failed to parse fixture response"
            );
            FixtureError::Parse(error)
        })
    }

    /// Fetch the books fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn fetch_books(&self) -> Result<Vec<Book>, FixtureError> {
        if let Some(CachedCollection::Books(books)) =
            self.inner.cache.get(&Collection::Books).await
        {
            debug!("cache hit for books fixture");
            return Ok(books);
        }

        let books = self.fetch_raw::<Book>(Collection::Books).await?;

        self.inner
            .cache
            .insert(Collection::Books, CachedCollection::Books(books.clone()))
            .await;

        Ok(books)
    }

    /// Fetch the authors fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn fetch_authors(&self) -> Result<Vec<Author>, FixtureError> {
        if let Some(CachedCollection::Authors(authors)) =
            self.inner.cache.get(&Collection::Authors).await
        {
            debug!("cache hit for authors fixture");
            return Ok(authors);
        }

        let authors = self.fetch_raw::<Author>(Collection::Authors).await?;

        self.inner
            .cache
            .insert(
                Collection::Authors,
                CachedCollection::Authors(authors.clone()),
            )
            .await;

        Ok(authors)
    }

    /// Fetch the stores fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not parse.
    #[instrument(skip(self))]
    pub async fn fetch_stores(&self) -> Result<Vec<Store>, FixtureError> {
        if let Some(CachedCollection::Stores(stores)) =
            self.inner.cache.get(&Collection::Stores).await
        {
            debug!("cache hit for stores fixture");
            return Ok(stores);
        }

        let stores = self.fetch_raw::<Store>(Collection::Stores).await?;

        self.inner
            .cache
            .insert(Collection::Stores, CachedCollection::Stores(stores.clone()))
            .await;

        Ok(stores)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop the cached response for one collection; the next fetch goes to
    /// the fixture source again.
    pub async fn invalidate(&self, collection: Collection) {
        self.inner.cache.invalidate(&collection).await;
    }

    /// Drop every cached response.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_error_display() {
        let err = FixtureError::Status {
            collection: Collection::Authors,
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "fixture endpoint for authors returned HTTP 404"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_http_error() {
        // Port 9 (discard) is not listening; the connection is refused
        // without touching the network.
        let base = "http://127.0.0.1:9/api/".parse().expect("static url");
        let client = FixtureClient::new(&base);

        let result = client.fetch_books().await;
        assert!(matches!(result, Err(FixtureError::Http(_))));
    }
}
