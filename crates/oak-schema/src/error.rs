//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry and entry validators.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// Value did not pass validation.
    #[error("Validation failed: {}", .errors.join("; "))]
    ValidationFailed {
        /// Individual error messages, one per problem found.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}
