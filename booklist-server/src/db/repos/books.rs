//! PostgreSQL book repository
//!
//! One parameterized statement per operation:
//! - list: unfiltered SELECT, no ORDER BY
//! - get: fetch_optional, absent row becomes `DbError::NotFound`
//! - insert: INSERT ... RETURNING id

use async_trait::async_trait;
use sqlx::PgPool;

use super::{BookRepository, DbError};
use crate::models::{Book, BookId, NewBook};

/// Book repository backed by the shared pool
#[derive(Debug, Clone)]
pub struct PgBookRepo {
    pool: PgPool,
}

impl PgBookRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepo {
    async fn list(&self) -> Result<Vec<Book>, DbError> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, author, year FROM books")
            .fetch_all(&self.pool)
            .await?;

        Ok(books)
    }

    async fn get(&self, id: BookId) -> Result<Book, DbError> {
        sqlx::query_as::<_, Book>("SELECT id, title, author, year FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::book_not_found(id))
    }

    async fn insert(&self, book: NewBook) -> Result<BookId, DbError> {
        let id: BookId = sqlx::query_scalar(
            "INSERT INTO books (title, author, year) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.year)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(&self, book: Book) -> Result<u64, DbError> {
        let result =
            sqlx::query("UPDATE books SET title = $1, author = $2, year = $3 WHERE id = $4")
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.year)
                .bind(book.id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: BookId) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
