//! Database layer - connection pool, schema and repositories
//!
//! - One `PgPool` shared by every request; sqlx handles concurrent use
//! - Every repository call is a single statement, no transactions
//! - "No matching row" is a typed outcome, never a panic

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect, create_pool_with_options, describe_target, ConnectError};
pub use repos::*;
