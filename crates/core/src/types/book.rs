//! Book entity record.

use serde::{Deserialize, Serialize};

use crate::{AuthorId, BookId, StoreId};

/// A book in the catalog.
///
/// Matches the fixture schema field-for-field. `author_id` is semantically a
/// reference to an [`Author`](crate::Author), but the catalog does not
/// enforce it - an author can be deleted out from under a book, and lookups
/// must treat a missing match as an explicit miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique book ID (string on the wire).
    pub id: BookId,
    /// Referenced author. Never validated against the authors collection.
    pub author_id: AuthorId,
    /// Title.
    pub name: String,
    /// ISBN, stored as entered.
    pub isbn: String,
    /// Publication language.
    pub language: String,
    /// Number of pages. The CLI rejects zero before a record is built.
    pub page_count: u32,
    /// Binding format (e.g. "Hardcover", "Paperback").
    pub format: String,
    /// Store carrying this book, when assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_fixture_shape() {
        let json = r#"{
            "id": "1",
            "author_id": 2,
            "name": "The Left Hand of Darkness",
            "isbn": "978-0441478125",
            "language": "English",
            "page_count": 304,
            "format": "Paperback"
        }"#;

        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, BookId::new("1"));
        assert_eq!(book.author_id, AuthorId::new(2));
        assert_eq!(book.page_count, 304);
        assert!(book.store_id.is_none());
    }

    #[test]
    fn test_store_id_omitted_when_absent() {
        let book = Book {
            id: BookId::new("1"),
            author_id: AuthorId::new(1),
            name: "Dune".to_owned(),
            isbn: "978-0441172719".to_owned(),
            language: "English".to_owned(),
            page_count: 412,
            format: "Hardcover".to_owned(),
            store_id: None,
        };

        let json = serde_json::to_string(&book).unwrap();
        assert!(!json.contains("store_id"));
    }
}
