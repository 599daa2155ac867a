//! Persistent local store management.

use tracing::info;

use paperback_catalog::{Collection, FileStorage, StoragePort};

use crate::config::Config;

use super::CommandError;

/// Remove persisted collections.
///
/// This is the external reset: a cleared collection hydrates from the
/// fixture source again on the next command.
pub fn clear(config: &Config, collection: Option<Collection>) -> Result<(), CommandError> {
    let storage = FileStorage::new(&config.data_dir);

    match collection {
        Some(collection) => {
            storage.clear(collection)?;
            info!(%collection, "persisted collection cleared");
        }
        None => {
            for collection in Collection::ALL {
                storage.clear(collection)?;
            }
            info!("all persisted collections cleared");
        }
    }

    Ok(())
}
