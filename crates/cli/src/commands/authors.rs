//! Authors admin commands.

use tracing::{info, warn};

use paperback_core::{Author, AuthorId, Email};

use crate::config::Config;
use crate::{AddAuthorArgs, UpdateAuthorArgs};

use super::{CommandError, matches_search, open_and_hydrate, required_field};

/// List authors, optionally filtered by full name.
pub async fn list(config: &Config, search: Option<&str>) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;

    let rows: Vec<&Author> = catalog
        .authors()
        .snapshot()
        .iter()
        .filter(|a| matches_search(&a.full_name(), search))
        .collect();

    if rows.is_empty() {
        println!("no authors found");
        return Ok(());
    }

    println!(
        "{:<6} {:<28} {:<32} {}",
        "ID", "NAME", "EMAIL", "NATIONALITY"
    );
    for author in rows {
        println!(
            "{:<6} {:<28} {:<32} {}",
            author.id.as_i32(),
            author.full_name(),
            author.email.as_str(),
            author.nationality
        );
    }

    Ok(())
}

/// Add a new author. The id is assigned from the current collection.
pub async fn add(config: &Config, args: &AddAuthorArgs) -> Result<(), CommandError> {
    let first_name = required_field(&args.first_name, "first name")?;
    let last_name = required_field(&args.last_name, "last name")?;
    let email = Email::parse(args.email.trim())?;
    let nationality = required_field(&args.nationality, "nationality")?;

    let mut catalog = open_and_hydrate(config).await;

    let id = catalog.authors().next_id();
    let author = Author {
        id,
        first_name,
        last_name,
        email,
        nationality,
    };

    catalog.authors_mut().add(author)?;
    info!(%id, "author added");
    Ok(())
}

/// Update an existing author, merging the given fields over the current
/// record.
pub async fn update(config: &Config, args: &UpdateAuthorArgs) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = AuthorId::new(args.id);
    let Some(mut author) = catalog.authors().index().get(&id).cloned() else {
        warn!(%id, "no author with this id, nothing updated");
        return Ok(());
    };

    if let Some(first_name) = &args.first_name {
        author.first_name = required_field(first_name, "first name")?;
    }
    if let Some(last_name) = &args.last_name {
        author.last_name = required_field(last_name, "last name")?;
    }
    if let Some(email) = &args.email {
        author.email = Email::parse(email.trim())?;
    }
    if let Some(nationality) = &args.nationality {
        author.nationality = required_field(nationality, "nationality")?;
    }

    if catalog.authors_mut().update(author)? {
        info!(%id, "author updated");
    } else {
        warn!(%id, "no author with this id, nothing updated");
    }
    Ok(())
}

/// Delete an author by id.
///
/// Books referencing the author are left in place with a now-dangling
/// `author_id`; browse views render those as an explicit unknown.
pub async fn delete(config: &Config, id: i32) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = AuthorId::new(id);
    let removed = catalog.authors_mut().delete(&id)?;
    if removed == 0 {
        warn!(%id, "no author with this id, nothing deleted");
    } else {
        let orphaned = catalog
            .books()
            .snapshot()
            .iter()
            .filter(|b| b.author_id == id)
            .count();
        info!(%id, removed, orphaned, "author deleted");
    }
    Ok(())
}
