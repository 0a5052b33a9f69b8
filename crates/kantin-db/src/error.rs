//! Database-specific error types and conversions.

use kantin_core::error::KantinError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for KantinError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => KantinError::NotFound { entity, id },
            other => KantinError::Database(other.to_string()),
        }
    }
}
