//! KANTIN Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Repository implementations for the `kantin-core` traits

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{Db, DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
