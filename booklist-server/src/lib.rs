//! booklist-server: HTTP CRUD service for a single `books` table
//!
//! Layers, leaf first:
//! - [`db`] - connection pool, schema bootstrap and book repositories
//! - [`models`] - the `Book` record and request payloads
//! - [`http`] - axum router, handlers and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{connect, BookRepository, DbError, MemoryBookRepo, PgBookRepo};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use models::{Book, NewBook};
