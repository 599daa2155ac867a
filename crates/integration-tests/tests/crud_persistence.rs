//! Integration tests for CRUD mutations persisting across restarts.
//!
//! These run against the file-backed local store only; no fixture host is
//! involved because mutations never touch the fixture layer.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use paperback_catalog::{
    CollectionStore, FileStorage, HydrationPolicy, HydrationState, StoragePort,
};
use paperback_core::{Author, AuthorId, Book, BookId, Email, StoreId};
use paperback_integration_tests::temp_data_dir;

fn storage(data_dir: &Path) -> Arc<dyn StoragePort> {
    Arc::new(FileStorage::new(data_dir))
}

fn book(id: &str, name: &str) -> Book {
    Book {
        id: BookId::new(id),
        author_id: AuthorId::new(1),
        name: name.to_owned(),
        isbn: "978-0140177398".to_owned(),
        language: "English".to_owned(),
        page_count: 160,
        format: "Paperback".to_owned(),
        store_id: Some(StoreId::new(1)),
    }
}

fn author(id: i32, first: &str, last: &str) -> Author {
    Author {
        id: AuthorId::new(id),
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: Email::parse("author@example.com").expect("static email"),
        nationality: "American".to_owned(),
    }
}

#[test]
fn test_crud_cycle_survives_restart() {
    let data_dir = temp_data_dir();

    {
        let mut books: CollectionStore<Book> =
            CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);

        books.add(book("1", "Of Mice and Men")).expect("add");
        books.add(book("2", "Cannery Row")).expect("add");

        let mut revised = book("2", "Cannery Row (Centennial Edition)");
        revised.page_count = 208;
        assert!(books.update(revised).expect("update"));
    }

    // Restart: the store reloads exactly what was written through.
    let mut books: CollectionStore<Book> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    assert_eq!(books.len(), 2);
    assert_eq!(books.state(), HydrationState::Populated);
    assert_eq!(
        books.index().get(&BookId::new("2")).expect("book 2").name,
        "Cannery Row (Centennial Edition)"
    );

    assert_eq!(books.delete(&BookId::new("1")).expect("delete"), 1);

    // And once more across a restart.
    drop(books);
    let books: CollectionStore<Book> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    assert_eq!(books.len(), 1);

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[test]
fn test_delete_removes_only_the_matching_id() {
    let data_dir = temp_data_dir();

    let mut authors: CollectionStore<Author> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    authors
        .set_all(vec![
            author(1, "John", "Steinbeck"),
            author(2, "Ursula", "Le Guin"),
            author(3, "Octavia", "Butler"),
        ])
        .expect("seed");

    assert_eq!(authors.delete(&AuthorId::new(2)).expect("delete"), 1);
    let ids: Vec<i32> = authors.snapshot().iter().map(|a| a.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 3]);

    // Deleting again is an idempotent persisted no-op.
    assert_eq!(authors.delete(&AuthorId::new(2)).expect("delete again"), 0);
    let ids: Vec<i32> = authors.snapshot().iter().map(|a| a.id.as_i32()).collect();
    assert_eq!(ids, vec![1, 3]);

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[test]
fn test_corrupt_collection_file_degrades_to_empty_without_touching_others() {
    let data_dir = temp_data_dir();

    {
        let mut books: CollectionStore<Book> =
            CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
        books.add(book("1", "Kept Elsewhere")).expect("add");

        let mut authors: CollectionStore<Author> =
            CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
        authors.add(author(1, "John", "Steinbeck")).expect("add");
    }

    // Corrupt only the books file.
    fs::write(data_dir.join("books.json"), "{definitely not json").expect("corrupt file");

    let books: CollectionStore<Book> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    assert!(books.is_empty());
    assert_eq!(books.state(), HydrationState::Empty);

    let authors: CollectionStore<Author> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    assert_eq!(authors.len(), 1);

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[test]
fn test_empty_collection_roundtrip() {
    let data_dir = temp_data_dir();

    {
        let mut books: CollectionStore<Book> =
            CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
        books.set_all(Vec::new()).expect("persist empty");
        assert_eq!(books.state(), HydrationState::Populated);
    }

    let persisted = fs::read_to_string(data_dir.join("books.json")).expect("file exists");
    assert_eq!(persisted, "[]");

    // An empty persisted collection is indistinguishable from never-loaded
    // after a restart: the store comes back Empty and hydratable.
    let books: CollectionStore<Book> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    assert!(books.is_empty());
    assert_eq!(books.state(), HydrationState::Empty);
    assert!(books.hydration_applies());

    fs::remove_dir_all(&data_dir).expect("cleanup");
}

#[test]
fn test_clear_removes_the_persisted_file() {
    let data_dir = temp_data_dir();

    let mut books: CollectionStore<Book> =
        CollectionStore::open(storage(&data_dir), HydrationPolicy::FirstWriteWins);
    books.add(book("1", "Ephemeral")).expect("add");
    assert!(data_dir.join("books.json").exists());

    books.clear().expect("clear");
    assert!(!data_dir.join("books.json").exists());
    assert_eq!(books.state(), HydrationState::Empty);

    let _ = fs::remove_dir_all(&data_dir);
}
