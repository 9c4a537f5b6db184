//! Error types for oak-db.
//!
//! `DatabaseError` covers storage failures. `ServiceError` is what public
//! operations return: either a typed domain error from `oak-core` or a
//! storage error, never a mix of the two.

use oak_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A JSON column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result of a public store operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Not found, already exists, blocked, merge conflict, or validation.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The transaction failed and was rolled back.
    #[error(transparent)]
    Storage(#[from] DatabaseError),
}

impl ServiceError {
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// The domain error, if this is one.
    #[must_use]
    pub const fn as_domain(&self) -> Option<&CoreError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Storage(_) => None,
        }
    }
}

impl From<libsql::Error> for ServiceError {
    fn from(e: libsql::Error) -> Self {
        Self::Storage(DatabaseError::LibSql(e))
    }
}

impl From<oak_schema::SchemaError> for ServiceError {
    fn from(e: oak_schema::SchemaError) -> Self {
        Self::Domain(CoreError::Validation(e.to_string()))
    }
}
