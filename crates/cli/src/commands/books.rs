//! Books admin commands.

use tracing::{info, warn};

use paperback_core::{Author, AuthorId, Book, BookId, StoreId};

use crate::config::Config;
use crate::{AddBookArgs, UpdateBookArgs};

use super::{CommandError, matches_search, open_and_hydrate, positive_pages, required_field};

/// List books, optionally filtered by name.
pub async fn list(config: &Config, search: Option<&str>) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;
    let authors = catalog.authors().index();

    let rows: Vec<&Book> = catalog
        .books()
        .snapshot()
        .iter()
        .filter(|b| matches_search(&b.name, search))
        .collect();

    if rows.is_empty() {
        println!("no books found");
        return Ok(());
    }

    println!(
        "{:<8} {:<36} {:<24} {:>6}  {}",
        "ID", "NAME", "AUTHOR", "PAGES", "FORMAT"
    );
    for book in rows {
        let author = authors
            .get(&book.author_id)
            .map_or_else(|| format!("unknown author ({})", book.author_id), Author::full_name);
        println!(
            "{:<8} {:<36} {:<24} {:>6}  {}",
            book.id.as_str(),
            book.name,
            author,
            book.page_count,
            book.format
        );
    }

    Ok(())
}

/// Add a new book. The id is assigned from the current collection.
pub async fn add(config: &Config, args: &AddBookArgs) -> Result<(), CommandError> {
    let name = required_field(&args.name, "name")?;
    let isbn = required_field(&args.isbn, "isbn")?;
    let language = required_field(&args.language, "language")?;
    let format = required_field(&args.format, "format")?;
    let page_count = positive_pages(args.pages)?;

    let mut catalog = open_and_hydrate(config).await;

    let id = catalog.books().next_id();
    let book = Book {
        id: id.clone(),
        author_id: AuthorId::new(args.author),
        name,
        isbn,
        language,
        page_count,
        format,
        store_id: args.store.map(StoreId::new),
    };

    catalog.books_mut().add(book)?;
    info!(%id, "book added");
    Ok(())
}

/// Update an existing book, merging the given fields over the current
/// record.
pub async fn update(config: &Config, args: &UpdateBookArgs) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = BookId::new(args.id.clone());
    let Some(mut book) = catalog.books().index().get(&id).cloned() else {
        warn!(%id, "no book with this id, nothing updated");
        return Ok(());
    };

    if let Some(name) = &args.name {
        book.name = required_field(name, "name")?;
    }
    if let Some(author) = args.author {
        book.author_id = AuthorId::new(author);
    }
    if let Some(isbn) = &args.isbn {
        book.isbn = required_field(isbn, "isbn")?;
    }
    if let Some(language) = &args.language {
        book.language = required_field(language, "language")?;
    }
    if let Some(pages) = args.pages {
        book.page_count = positive_pages(pages)?;
    }
    if let Some(format) = &args.format {
        book.format = required_field(format, "format")?;
    }
    if let Some(store) = args.store {
        book.store_id = Some(StoreId::new(store));
    }

    if catalog.books_mut().update(book)? {
        info!(%id, "book updated");
    } else {
        warn!(%id, "no book with this id, nothing updated");
    }
    Ok(())
}

/// Delete a book by id.
pub async fn delete(config: &Config, id: &str) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = BookId::new(id);
    let removed = catalog.books_mut().delete(&id)?;
    if removed == 0 {
        warn!(%id, "no book with this id, nothing deleted");
    } else {
        info!(%id, removed, "book deleted");
    }
    Ok(())
}
