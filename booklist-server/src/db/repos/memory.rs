//! In-process book repository
//!
//! Same contract as the SQL repository: ids start at 1, are assigned on
//! insert and never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookRepository, DbError};
use crate::models::{Book, BookId, NewBook};

#[derive(Debug, Default)]
pub struct MemoryBookRepo {
    inner: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    rows: BTreeMap<BookId, Book>,
    last_id: BookId,
}

impl MemoryBookRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepo {
    async fn list(&self) -> Result<Vec<Book>, DbError> {
        let state = self.inner.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn get(&self, id: BookId) -> Result<Book, DbError> {
        let state = self.inner.read().await;
        state
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::book_not_found(id))
    }

    async fn insert(&self, book: NewBook) -> Result<BookId, DbError> {
        let mut state = self.inner.write().await;
        state.last_id += 1;
        let id = state.last_id;
        state.rows.insert(id, book.with_id(id));
        Ok(id)
    }

    async fn update(&self, book: Book) -> Result<u64, DbError> {
        let mut state = self.inner.write().await;
        match state.rows.get_mut(&book.id) {
            Some(row) => {
                *row = book;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: BookId) -> Result<u64, DbError> {
        let mut state = self.inner.write().await;
        Ok(state.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: title.into(),
            author: "A".into(),
            year: "2020".into(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_and_not_reused() {
        let repo = MemoryBookRepo::new();
        assert_eq!(repo.insert(new_book("one")).await.unwrap(), 1);
        assert_eq!(repo.insert(new_book("two")).await.unwrap(), 2);

        repo.delete(2).await.unwrap();
        assert_eq!(repo.insert(new_book("three")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn empty_repo_lists_nothing() {
        let repo = MemoryBookRepo::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_book_is_not_found() {
        let repo = MemoryBookRepo::new();
        let err = repo.get(7).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "book", .. }));
    }

    #[tokio::test]
    async fn update_and_delete_report_rows_affected() {
        let repo = MemoryBookRepo::new();
        let id = repo.insert(new_book("Go")).await.unwrap();

        let changed = Book {
            id,
            title: "Rust".into(),
            author: "B".into(),
            year: "2021".into(),
        };
        assert_eq!(repo.update(changed.clone()).await.unwrap(), 1);
        assert_eq!(repo.get(id).await.unwrap(), changed);

        assert_eq!(repo.update(new_book("ghost").with_id(42)).await.unwrap(), 0);
        assert_eq!(repo.delete(id).await.unwrap(), 1);
        assert_eq!(repo.delete(id).await.unwrap(), 0);
    }
}
