//! Entity types, audit actions, and taxonomic levels.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for SQL storage.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Kinds of stored objects, used in audit entries and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Entry,
    Source,
    SourceRecord,
    Taxon,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Source => "source",
            Self::SourceRecord => "source_record",
            Self::Taxon => "taxon",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Mutations recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Merged,
    HybridLinked,
    HybridUnlinked,
    SourceAttached,
    SourceDetached,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Merged => "merged",
            Self::HybridLinked => "hybrid_linked",
            Self::HybridUnlinked => "hybrid_unlinked",
            Self::SourceAttached => "source_attached",
            Self::SourceDetached => "source_detached",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TaxonLevel
// ---------------------------------------------------------------------------

/// Rank of a taxon row. Entries reference taxa only by name at one of these
/// levels; the hierarchy between levels is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaxonLevel {
    Subgenus,
    Section,
    Subsection,
    Complex,
}

impl TaxonLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subgenus => "subgenus",
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for TaxonLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConflictStrategy
// ---------------------------------------------------------------------------

/// Named conflict policy, as selected in config or on the command line.
///
/// `Ask` needs a resolver at run time; see [`crate::merge::ConflictPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    #[default]
    PreferExisting,
    PreferImported,
    Skip,
    Fail,
    Ask,
}

impl ConflictStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreferExisting => "prefer_existing",
            Self::PreferImported => "prefer_imported",
            Self::Skip => "skip",
            Self::Fail => "fail",
            Self::Ask => "ask",
        }
    }
}

impl fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AuditAction::HybridLinked, "\"hybrid_linked\"")]
    #[case(AuditAction::SourceDetached, "\"source_detached\"")]
    #[case(AuditAction::Merged, "\"merged\"")]
    fn audit_action_serializes_as_str(#[case] action: AuditAction, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&action).unwrap(), json);
        assert_eq!(format!("\"{action}\""), json);
    }

    #[rstest]
    #[case("subgenus", TaxonLevel::Subgenus)]
    #[case("complex", TaxonLevel::Complex)]
    fn taxon_level_parses(#[case] raw: &str, #[case] expected: TaxonLevel) {
        let parsed: TaxonLevel = serde_json::from_value(serde_json::json!(raw)).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), raw);
    }

    #[test]
    fn default_strategy_keeps_existing() {
        assert_eq!(ConflictStrategy::default(), ConflictStrategy::PreferExisting);
    }
}
