//! Domain error type shared by every oak crate.
//!
//! Storage errors (`DatabaseError`) live in `oak-db`. Operations on the
//! service return domain errors from here as typed values so that callers can
//! tell a blocked delete or a missing entry apart from a failed transaction.

use thiserror::Error;

use crate::enums::EntityType;
use crate::merge::MergeConflict;

/// Errors that can be raised by any oak crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Create was called for a key that is already stored.
    #[error("Entity already exists: {entity_type} {id}")]
    AlreadyExists { entity_type: String, id: String },

    /// Delete refused because other entries still name this one as a parent.
    #[error(
        "Cannot delete '{name}': still a parent of {}",
        .blocking_hybrids.join(", ")
    )]
    Blocked {
        name: String,
        blocking_hybrids: Vec<String>,
    },

    /// Scalar fields disagree between a stored entry and an imported record.
    #[error("Merge conflict: {0}")]
    MergeConflict(MergeConflict),

    /// Data failed validation (schema, vocabulary, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub fn not_found(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    pub fn already_exists(entity_type: EntityType, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_message_names_every_hybrid() {
        let err = CoreError::Blocked {
            name: "alba".into(),
            blocking_hybrids: vec!["× bebbiana".into(), "× jackiana".into()],
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete 'alba': still a parent of × bebbiana, × jackiana"
        );
    }

    #[test]
    fn merge_conflict_message_names_field_and_values() {
        let err = CoreError::MergeConflict(MergeConflict::new("author", "Y", "X"));
        let msg = err.to_string();
        assert!(msg.contains("author"));
        assert!(msg.contains("'Y'"));
        assert!(msg.contains("'X'"));
    }

    #[test]
    fn not_found_uses_entity_type_name() {
        let err = CoreError::not_found(EntityType::SourceRecord, "alba/3");
        assert_eq!(err.to_string(), "Entity not found: source_record alba/3");
    }
}
