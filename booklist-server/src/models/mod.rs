//! Domain models
//!
//! Decoding is the only validation: serde rejects missing fields and
//! wrong types, everything else (including empty strings) is accepted.

pub mod book;
pub mod validation;

pub use book::{Book, BookId, NewBook};
pub use validation::ValidationError;
