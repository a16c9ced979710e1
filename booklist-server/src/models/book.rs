//! Book record

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Primary key type, matches the `SERIAL` column.
pub type BookId = i32;

/// A row of the `books` table.
///
/// `year` is free text; the column is `TEXT`, not a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: String,
}

/// Payload for creating a book. The id is assigned by the database, so a
/// client-supplied `id` is silently dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl NewBook {
    /// Attach a storage-assigned id.
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_book_ignores_client_id() {
        let book: NewBook =
            serde_json::from_str(r#"{"id":99,"title":"Go","author":"A","year":"2020"}"#).unwrap();
        assert_eq!(book.with_id(1).id, 1);
    }

    #[test]
    fn new_book_requires_all_fields() {
        let err = serde_json::from_str::<NewBook>(r#"{"title":"Go","author":"A"}"#).unwrap_err();
        assert!(err.to_string().contains("year"));
    }

    #[test]
    fn empty_strings_are_accepted() {
        let book: NewBook =
            serde_json::from_str(r#"{"title":"","author":"","year":""}"#).unwrap();
        assert!(book.title.is_empty());
    }

    #[test]
    fn book_serializes_with_string_year() {
        let book = Book {
            id: 1,
            title: "Go".into(),
            author: "A".into(),
            year: "2020".into(),
        };
        assert_eq!(
            serde_json::to_string(&book).unwrap(),
            r#"{"id":1,"title":"Go","author":"A","year":"2020"}"#
        );
    }
}
