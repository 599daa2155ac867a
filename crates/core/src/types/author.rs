//! Author entity record.

use serde::{Deserialize, Serialize};

use crate::{AuthorId, Email};

/// An author in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Unique author ID, assigned as max-existing+1 on insert.
    pub id: AuthorId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact address. Validated at the CLI boundary, not on deserialize.
    pub email: Email,
    /// Free-form nationality label.
    pub nationality: String,
}

impl Author {
    /// Display name in "First Last" form, as the browse views render it.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fixture_shape() {
        let json = r#"{
            "id": 1,
            "first_name": "Ursula",
            "last_name": "Le Guin",
            "email": "ursula@example.com",
            "nationality": "American"
        }"#;

        let author: Author = serde_json::from_str(json).unwrap();
        assert_eq!(author.id, AuthorId::new(1));
        assert_eq!(author.full_name(), "Ursula Le Guin");
    }
}
