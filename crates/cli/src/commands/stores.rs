//! Stores admin commands.

use tracing::{info, warn};

use paperback_core::{Store, StoreId};

use crate::config::Config;
use crate::{AddStoreArgs, UpdateStoreArgs};

use super::{CommandError, matches_search, open_and_hydrate, required_field};

/// List stores, optionally filtered by name.
pub async fn list(config: &Config, search: Option<&str>) -> Result<(), CommandError> {
    let catalog = open_and_hydrate(config).await;

    let rows: Vec<&Store> = catalog
        .stores()
        .snapshot()
        .iter()
        .filter(|s| matches_search(&s.name, search))
        .collect();

    if rows.is_empty() {
        println!("no stores found");
        return Ok(());
    }

    println!(
        "{:<6} {:<28} {:<24} {:<4} {}",
        "ID", "NAME", "CITY", "ST", "ZIP"
    );
    for store in rows {
        println!(
            "{:<6} {:<28} {:<24} {:<4} {}",
            store.id.as_i32(),
            store.name,
            store.city,
            store.state,
            store.zip
        );
    }

    Ok(())
}

/// Add a new store. The id is assigned from the current collection.
pub async fn add(config: &Config, args: &AddStoreArgs) -> Result<(), CommandError> {
    let name = required_field(&args.name, "name")?;
    let address_1 = required_field(&args.address_1, "address line 1")?;
    let city = required_field(&args.city, "city")?;
    let state = required_field(&args.state, "state")?;
    let zip = required_field(&args.zip, "zip")?;

    let mut catalog = open_and_hydrate(config).await;

    let id = catalog.stores().next_id();
    let store = Store {
        id,
        name,
        address_1,
        address_2: args.address_2.as_ref().map(|a| a.trim().to_owned()),
        city,
        state,
        zip,
        books: None,
    };

    catalog.stores_mut().add(store)?;
    info!(%id, "store added");
    Ok(())
}

/// Update an existing store, merging the given fields over the current
/// record.
pub async fn update(config: &Config, args: &UpdateStoreArgs) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = StoreId::new(args.id);
    let Some(mut store) = catalog.stores().index().get(&id).cloned() else {
        warn!(%id, "no store with this id, nothing updated");
        return Ok(());
    };

    if let Some(name) = &args.name {
        store.name = required_field(name, "name")?;
    }
    if let Some(address_1) = &args.address_1 {
        store.address_1 = required_field(address_1, "address line 1")?;
    }
    if let Some(address_2) = &args.address_2 {
        store.address_2 = Some(address_2.trim().to_owned());
    }
    if let Some(city) = &args.city {
        store.city = required_field(city, "city")?;
    }
    if let Some(state) = &args.state {
        store.state = required_field(state, "state")?;
    }
    if let Some(zip) = &args.zip {
        store.zip = required_field(zip, "zip")?;
    }

    if catalog.stores_mut().update(store)? {
        info!(%id, "store updated");
    } else {
        warn!(%id, "no store with this id, nothing updated");
    }
    Ok(())
}

/// Delete a store by id.
pub async fn delete(config: &Config, id: i32) -> Result<(), CommandError> {
    let mut catalog = open_and_hydrate(config).await;

    let id = StoreId::new(id);
    let removed = catalog.stores_mut().delete(&id)?;
    if removed == 0 {
        warn!(%id, "no store with this id, nothing deleted");
    } else {
        info!(%id, removed, "store deleted");
    }
    Ok(())
}
