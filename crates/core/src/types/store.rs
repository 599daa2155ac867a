//! Store entity record.

use serde::{Deserialize, Serialize};

use crate::{Book, StoreId};

/// A physical bookstore location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    /// Unique store ID, assigned as max-existing+1 on insert.
    pub id: StoreId,
    /// Store name.
    pub name: String,
    /// First address line.
    pub address_1: String,
    /// Second address line, when present. Fixtures may carry an explicit
    /// `null` here, so this stays a plain `Option` rather than being
    /// skipped on serialize.
    pub address_2: Option<String>,
    /// City.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Postal code, stored as entered.
    pub zip: String,
    /// Inventory embedded by the fixture source. Not maintained by the
    /// catalog; live inventory is resolved through `Book::store_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub books: Option<Vec<Book>>,
}
