//! Fixture synchronization command.

use tracing::info;

use paperback_catalog::Collection;

use crate::config::Config;

use super::{CommandError, open_catalog};

/// Hydrate every collection from the fixture source.
///
/// Unlike the browse commands, a fetch failure here is fatal: the whole
/// point of `sync` is reaching the fixture endpoints.
pub async fn run(config: &Config, refresh: bool) -> Result<(), CommandError> {
    let mut catalog = open_catalog(config);

    if refresh {
        catalog.fixtures().invalidate_all().await;
        info!("fixture cache invalidated");
    }

    let applied = catalog.hydrate_books().await?;
    report(Collection::Books, applied, catalog.books().len());

    let applied = catalog.hydrate_authors().await?;
    report(Collection::Authors, applied, catalog.authors().len());

    let applied = catalog.hydrate_stores().await?;
    report(Collection::Stores, applied, catalog.stores().len());

    Ok(())
}

fn report(collection: Collection, applied: bool, len: usize) {
    if applied {
        info!(%collection, entries = len, "hydrated from fixture");
    } else {
        info!(%collection, entries = len, "already populated, kept local data");
    }
}
