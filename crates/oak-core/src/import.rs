//! Per-record outcomes and the batch summary returned by bulk import.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::merge::MergeConflict;

/// What happened to one imported record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImportOutcome {
    Created,
    Merged {
        conflicts: Vec<MergeConflict>,
    },
    Skipped {
        conflicts: Vec<MergeConflict>,
    },
    Errored {
        reason: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conflicts: Vec<MergeConflict>,
    },
}

impl ImportOutcome {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Merged { .. } => "merged",
            Self::Skipped { .. } => "skipped",
            Self::Errored { .. } => "errored",
        }
    }

    #[must_use]
    pub fn conflicts(&self) -> &[MergeConflict] {
        match self {
            Self::Created => &[],
            Self::Merged { conflicts }
            | Self::Skipped { conflicts }
            | Self::Errored { conflicts, .. } => conflicts,
        }
    }
}

/// Outcome for one record, keyed by the record's name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportDetail {
    pub name: String,
    #[serde(flatten)]
    pub outcome: ImportOutcome,
}

/// Totals and per-record details for a batch. `imported` counts created and
/// merged records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: u32,
    pub skipped: u32,
    pub errors: u32,
    pub details: Vec<ImportDetail>,
}

impl ImportSummary {
    pub fn record(&mut self, name: impl Into<String>, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Created | ImportOutcome::Merged { .. } => self.imported += 1,
            ImportOutcome::Skipped { .. } => self.skipped += 1,
            ImportOutcome::Errored { .. } => self.errors += 1,
        }
        self.details.push(ImportDetail {
            name: name.into(),
            outcome,
        });
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.imported + self.skipped + self.errors
    }
}
