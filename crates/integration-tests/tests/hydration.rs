//! Integration tests for the hydration path.
//!
//! Each test runs a private fixture host and a throwaway data directory,
//! exercising the full fetch -> seed -> persist pipeline.

use std::fs;
use std::sync::Arc;

use serde_json::json;

use paperback_catalog::{
    Catalog, CatalogError, Collection, FileStorage, FixtureClient, HydrationPolicy,
    HydrationState, StoragePort,
};
use paperback_core::BookId;
use paperback_integration_tests::{FixtureServer, Fixtures, temp_data_dir};

fn fixture_payloads() -> Fixtures {
    Fixtures::new(
        json!([{
            "id": "1",
            "author_id": 1,
            "name": "A Wizard of Earthsea",
            "isbn": "978-0547773742",
            "language": "English",
            "page_count": 183,
            "format": "Paperback",
            "store_id": 1
        }]),
        json!([{
            "id": 1,
            "first_name": "Ursula",
            "last_name": "Le Guin",
            "email": "ursula@example.com",
            "nationality": "American"
        }]),
        json!([{
            "id": 1,
            "name": "City Lights",
            "address_1": "261 Columbus Ave",
            "address_2": null,
            "city": "San Francisco",
            "state": "CA",
            "zip": "94133"
        }]),
    )
}

fn open_catalog(server: &FixtureServer, data_dir: &std::path::Path, policy: HydrationPolicy) -> Catalog {
    let storage: Arc<dyn StoragePort> = Arc::new(FileStorage::new(data_dir));
    let fixtures = FixtureClient::new(server.base_url());
    Catalog::open(storage, fixtures, policy)
}

// ============================================================================
// Seeding
// ============================================================================

#[tokio::test]
async fn test_hydration_seeds_memory_and_local_store() {
    let server = FixtureServer::spawn(fixture_payloads()).await;
    let data_dir = temp_data_dir();

    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);
    catalog.hydrate_all().await.expect("hydration succeeds");

    assert_eq!(catalog.books().len(), 1);
    assert_eq!(catalog.authors().len(), 1);
    assert_eq!(catalog.stores().len(), 1);
    assert_eq!(catalog.books().state(), HydrationState::Populated);

    // The local store now holds the same collection.
    let persisted = fs::read_to_string(data_dir.join("books.json")).expect("books persisted");
    assert!(persisted.contains("A Wizard of Earthsea"));

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[tokio::test]
async fn test_second_hydration_is_a_noop_in_the_same_session() {
    let server = FixtureServer::spawn(fixture_payloads()).await;
    let data_dir = temp_data_dir();

    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);
    assert!(catalog.hydrate_books().await.expect("first hydration"));
    assert!(!catalog.hydrate_books().await.expect("second hydration"));

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

// ============================================================================
// Policy Across Restarts
// ============================================================================

#[tokio::test]
async fn test_local_edits_survive_restart_under_first_write_wins() {
    let server = FixtureServer::spawn(fixture_payloads()).await;
    let data_dir = temp_data_dir();

    {
        let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);
        catalog.hydrate_all().await.expect("hydration succeeds");

        let mut book = catalog.books().snapshot().first().expect("seeded book").clone();
        book.name = "A Wizard of Earthsea (annotated)".to_owned();
        assert!(catalog.books_mut().update(book).expect("update succeeds"));
    }

    // The fixture source changes after our edit.
    server.set(
        Collection::Books,
        Some(json!([{
            "id": "1",
            "author_id": 1,
            "name": "Remote Replacement",
            "isbn": "978-0000000000",
            "language": "English",
            "page_count": 1,
            "format": "Paperback"
        }])),
    );

    // Restart: the edited record wins; the new fixture data is invisible.
    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);
    assert_eq!(catalog.books().state(), HydrationState::Populated);
    assert!(!catalog.hydrate_books().await.expect("hydration skipped"));
    assert_eq!(
        catalog.books().snapshot().first().expect("book").name,
        "A Wizard of Earthsea (annotated)"
    );

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[tokio::test]
async fn test_prefer_remote_overwrites_local_edits_on_restart() {
    let server = FixtureServer::spawn(fixture_payloads()).await;
    let data_dir = temp_data_dir();

    {
        let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::PreferRemote);
        catalog.hydrate_all().await.expect("hydration succeeds");

        let mut book = catalog.books().snapshot().first().expect("seeded book").clone();
        book.name = "Local Edit".to_owned();
        assert!(catalog.books_mut().update(book).expect("update succeeds"));
    }

    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::PreferRemote);
    assert!(catalog.hydrate_books().await.expect("hydration applies"));
    assert_eq!(
        catalog.books().snapshot().first().expect("book").name,
        "A Wizard of Earthsea"
    );

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

// ============================================================================
// Failure Modes
// ============================================================================

#[tokio::test]
async fn test_fixture_500_surfaces_typed_error_and_leaves_store_empty() {
    let mut fixtures = fixture_payloads();
    fixtures.books = None; // books endpoint answers 500
    let server = FixtureServer::spawn(fixtures).await;
    let data_dir = temp_data_dir();

    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);

    let result = catalog.hydrate_books().await;
    assert!(matches!(result, Err(CatalogError::Fixture(_))));
    assert_eq!(catalog.books().state(), HydrationState::Empty);
    assert!(!data_dir.join("books.json").exists());

    // The other collections are unaffected.
    catalog.hydrate_authors().await.expect("authors hydrate");
    assert_eq!(catalog.authors().len(), 1);

    // Once the endpoint recovers, a retry succeeds.
    server.set(Collection::Books, Some(json!([])));
    assert!(catalog.hydrate_books().await.expect("retry succeeds"));
    assert_eq!(catalog.books().state(), HydrationState::Populated);

    let _ = fs::remove_dir_all(&data_dir);
}

#[tokio::test]
async fn test_malformed_fixture_body_is_a_parse_error() {
    let mut fixtures = fixture_payloads();
    // An object where an array of books is expected.
    fixtures.books = Some(json!({"unexpected": "shape"}));
    let server = FixtureServer::spawn(fixtures).await;
    let data_dir = temp_data_dir();

    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::FirstWriteWins);

    let result = catalog.hydrate_books().await;
    assert!(matches!(result, Err(CatalogError::Fixture(_))));
    assert_eq!(catalog.books().state(), HydrationState::Empty);

    let _ = fs::remove_dir_all(&data_dir);
}

// ============================================================================
// Response Caching
// ============================================================================

#[tokio::test]
async fn test_repeated_fetches_hit_the_cache_until_invalidated() {
    let server = FixtureServer::spawn(fixture_payloads()).await;
    let data_dir = temp_data_dir();

    // PreferRemote so every hydration actually consults the fixture layer.
    let mut catalog = open_catalog(&server, &data_dir, HydrationPolicy::PreferRemote);
    catalog.hydrate_books().await.expect("first fetch");

    // The source changes, but the cached response is still served.
    server.set(
        Collection::Books,
        Some(json!([{
            "id": "2",
            "author_id": 1,
            "name": "The Tombs of Atuan",
            "isbn": "978-0689845369",
            "language": "English",
            "page_count": 180,
            "format": "Hardcover"
        }])),
    );

    catalog.hydrate_books().await.expect("cached fetch");
    assert_eq!(
        catalog.books().snapshot().first().expect("book").id,
        BookId::new("1")
    );

    // Invalidation forces the next fetch through to the source.
    catalog.fixtures().invalidate(Collection::Books).await;
    catalog.hydrate_books().await.expect("fresh fetch");
    assert_eq!(
        catalog.books().snapshot().first().expect("book").id,
        BookId::new("2")
    );

    fs::remove_dir_all(&data_dir).expect("cleanup");
}
