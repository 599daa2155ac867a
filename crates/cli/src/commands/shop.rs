//! Storefront-style browse views.
//!
//! These are read-only and resolve cross-collection references through the
//! id index: a book whose author is gone renders as an explicit unknown
//! instead of failing.

use paperback_core::{Author, StoreId};
use paperback_catalog::Collection;

use crate::config::Config;

use super::{CommandError, open_and_hydrate};

/// Browse all books with their authors.
pub async fn books(config: &Config) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;
    let authors = catalog.authors().index();
    let stores = catalog.stores().index();

    if catalog.books().is_empty() {
        println!("the shelves are empty");
        return Ok(());
    }

    for book in catalog.books().snapshot() {
        let author = authors
            .get(&book.author_id)
            .map_or_else(|| format!("unknown author ({})", book.author_id), Author::full_name);
        let carried = book
            .store_id
            .and_then(|id| stores.get(&id))
            .map_or(String::new(), |s| format!("  [{}]", s.name));

        println!(
            "{} - {} ({}, {} pages){carried}",
            book.name, author, book.format, book.page_count
        );
    }

    Ok(())
}

/// Browse authors with their title counts.
pub async fn authors(config: &Config) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;

    if catalog.authors().is_empty() {
        println!("no authors to show");
        return Ok(());
    }

    for author in catalog.authors().snapshot() {
        let titles = catalog
            .books()
            .snapshot()
            .iter()
            .filter(|b| b.author_id == author.id)
            .count();
        println!(
            "{} ({}) - {} title{}",
            author.full_name(),
            author.nationality,
            titles,
            if titles == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Browse store locations.
pub async fn stores(config: &Config) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;

    if catalog.stores().is_empty() {
        println!("no stores to show");
        return Ok(());
    }

    for store in catalog.stores().snapshot() {
        let carried = catalog
            .books()
            .snapshot()
            .iter()
            .filter(|b| b.store_id == Some(store.id))
            .count();
        println!(
            "{} - {}, {} {} - {} title{}",
            store.name,
            store.city,
            store.state,
            store.zip,
            carried,
            if carried == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Books carried by one store.
pub async fn inventory(config: &Config, store_id: i32) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;
    let id = StoreId::new(store_id);

    let Some(store) = catalog.stores().index().get(&id).cloned() else {
        return Err(CommandError::NotFound {
            collection: Collection::Stores,
            id: id.to_string(),
        });
    };

    let authors = catalog.authors().index();
    let carried: Vec<_> = catalog
        .books()
        .snapshot()
        .iter()
        .filter(|b| b.store_id == Some(id))
        .collect();

    println!("{} - {}, {}", store.name, store.city, store.state);
    if carried.is_empty() {
        println!("  (no books assigned)");
        return Ok(());
    }

    for book in carried {
        let author = authors
            .get(&book.author_id)
            .map_or_else(|| format!("unknown author ({})", book.author_id), Author::full_name);
        println!("  {} - {} ({})", book.name, author, book.format);
    }

    Ok(())
}
