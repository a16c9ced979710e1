//! Book repositories
//!
//! [`BookRepository`] is the seam between handlers and storage.
//! [`PgBookRepo`] runs parameterized SQL against the pool;
//! [`MemoryBookRepo`] keeps rows in process for tests and local runs.

pub mod books;
pub mod memory;

use async_trait::async_trait;

use crate::models::{Book, BookId, NewBook};

pub use books::PgBookRepo;
pub use memory::MemoryBookRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn book_not_found(id: BookId) -> Self {
        Self::NotFound {
            resource: "book",
            id: id.to_string(),
        }
    }
}

/// Storage operations over the `books` table.
///
/// Each call is one atomic statement. `update` and `delete` report the
/// number of affected rows; zero is a normal outcome, not an error.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, in whatever order storage returns them.
    async fn list(&self) -> Result<Vec<Book>, DbError>;

    /// One book by id, or [`DbError::NotFound`].
    async fn get(&self, id: BookId) -> Result<Book, DbError>;

    /// Insert and return the storage-assigned id.
    async fn insert(&self, book: NewBook) -> Result<BookId, DbError>;

    /// Replace title, author and year of the row matching `book.id`.
    async fn update(&self, book: Book) -> Result<u64, DbError>;

    async fn delete(&self, id: BookId) -> Result<u64, DbError>;

    /// Cheap round trip proving storage answers.
    async fn ping(&self) -> Result<(), DbError>;
}
