//! Book endpoints
//!
//! | Route               | Response                    |
//! |---------------------|-----------------------------|
//! | GET /books          | JSON array of books         |
//! | GET /books/{id}     | JSON book, 404 when absent  |
//! | POST /books         | JSON integer, the new id    |
//! | PUT /books          | JSON integer, rows updated  |
//! | DELETE /books/{id}  | JSON integer, rows deleted  |

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, BookIdPath};
use crate::http::server::AppState;
use crate::models::{Book, BookId, NewBook};

/// GET /books - list all books
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.books().list().await?;
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<Book>, ApiError> {
    let book = state.books().get(id).await?;
    Ok(Json(book))
}

/// POST /books - insert, the database assigns the id
async fn add_book(
    State(state): State<AppState>,
    ApiJson(book): ApiJson<NewBook>,
) -> Result<Json<BookId>, ApiError> {
    let id = state.books().insert(book).await?;
    tracing::debug!(id, "Book added");
    Ok(Json(id))
}

/// PUT /books - replace all fields of the book matching `id`
async fn update_book(
    State(state): State<AppState>,
    ApiJson(book): ApiJson<Book>,
) -> Result<Json<u64>, ApiError> {
    let id = book.id;
    let rows_updated = state.books().update(book).await?;
    tracing::debug!(id, rows_updated, "Book updated");
    Ok(Json(rows_updated))
}

/// DELETE /books/{id}
async fn remove_book(
    State(state): State<AppState>,
    BookIdPath(id): BookIdPath,
) -> Result<Json<u64>, ApiError> {
    let rows_deleted = state.books().delete(id).await?;
    tracing::debug!(id, rows_deleted, "Book removed");
    Ok(Json(rows_deleted))
}

/// Book routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books).post(add_book).put(update_book))
        .route("/books/{id}", get(get_book).delete(remove_book))
}
