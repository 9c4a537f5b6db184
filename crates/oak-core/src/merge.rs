//! Field-level merge of an imported record into a stored entry.
//!
//! List fields are unioned, keeping the stored order first. Scalar fields are
//! fill-only: an empty stored value takes the imported one, but two different
//! non-empty values become a [`MergeConflict`] resolved by a [`ConflictPolicy`].
//! `hybrids` is never merged; the stored value is carried through and the
//! relationship engine recomputes it on save anyway.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Entry;
use crate::enums::ConflictStrategy;

/// A scalar field populated on both sides with different values.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MergeConflict {
    pub field: String,
    pub existing: String,
    pub imported: String,
}

impl MergeConflict {
    pub fn new(
        field: impl Into<String>,
        existing: impl Into<String>,
        imported: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            existing: existing.into(),
            imported: imported.into(),
        }
    }
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: existing '{}' vs imported '{}'",
            self.field, self.existing, self.imported
        )
    }
}

/// Answer to a single conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    KeepExisting,
    TakeImported,
    SkipRecord,
}

/// Caller-supplied decision source for [`ConflictPolicy::Ask`].
///
/// Called once per conflict, in field order. Returning
/// [`Resolution::SkipRecord`] stops asking and skips the record.
pub trait ConflictResolver: Send {
    fn resolve(&mut self, entry_name: &str, conflict: &MergeConflict) -> Resolution;
}

/// How scalar conflicts are settled during import.
pub enum ConflictPolicy<'a> {
    PreferExisting,
    PreferImported,
    /// Write nothing for a conflicting record.
    Skip,
    /// Report a conflicting record as an error.
    Fail,
    Ask(&'a mut dyn ConflictResolver),
}

impl ConflictPolicy<'_> {
    /// Build a non-interactive policy from its configured name.
    ///
    /// Returns `None` for [`ConflictStrategy::Ask`], which needs a resolver.
    #[must_use]
    pub const fn from_strategy(strategy: ConflictStrategy) -> Option<Self> {
        match strategy {
            ConflictStrategy::PreferExisting => Some(Self::PreferExisting),
            ConflictStrategy::PreferImported => Some(Self::PreferImported),
            ConflictStrategy::Skip => Some(Self::Skip),
            ConflictStrategy::Fail => Some(Self::Fail),
            ConflictStrategy::Ask => None,
        }
    }

    #[must_use]
    pub const fn strategy(&self) -> ConflictStrategy {
        match self {
            Self::PreferExisting => ConflictStrategy::PreferExisting,
            Self::PreferImported => ConflictStrategy::PreferImported,
            Self::Skip => ConflictStrategy::Skip,
            Self::Fail => ConflictStrategy::Fail,
            Self::Ask(_) => ConflictStrategy::Ask,
        }
    }
}

impl fmt::Debug for ConflictPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConflictPolicy").field(&self.strategy()).finish()
    }
}

/// Result of merging one imported record into its stored counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    /// Ready to save. `conflicts` lists every conflict that was resolved.
    Merged {
        entry: Entry,
        conflicts: Vec<MergeConflict>,
    },
    Skipped { conflicts: Vec<MergeConflict> },
    Failed { conflicts: Vec<MergeConflict> },
}

/// Append values from `incoming` that `base` does not contain yet.
pub fn union_into<T: PartialEq + Clone>(base: &mut Vec<T>, incoming: &[T]) {
    for value in incoming {
        if !base.contains(value) {
            base.push(value.clone());
        }
    }
}

fn scalar_slots(entry: &mut Entry) -> [(&'static str, &mut Option<String>); 8] {
    [
        ("author", &mut entry.author),
        ("conservation_status", &mut entry.conservation_status),
        ("subgenus", &mut entry.subgenus),
        ("section", &mut entry.section),
        ("subsection", &mut entry.subsection),
        ("complex", &mut entry.complex),
        ("parent1", &mut entry.parent1),
        ("parent2", &mut entry.parent2),
    ]
}

fn scalar_values(entry: &Entry) -> [Option<&str>; 8] {
    [
        entry.author.as_deref(),
        entry.conservation_status.as_deref(),
        entry.subgenus.as_deref(),
        entry.section.as_deref(),
        entry.subsection.as_deref(),
        entry.complex.as_deref(),
        entry.parent1.as_deref(),
        entry.parent2.as_deref(),
    ]
}

/// Merge `imported` into `existing` under `policy`.
pub fn merge_entries(
    existing: &Entry,
    imported: &Entry,
    policy: &mut ConflictPolicy<'_>,
) -> MergeResult {
    let mut merged = existing.clone();

    union_into(&mut merged.synonyms, &imported.synonyms);
    union_into(&mut merged.closely_related_to, &imported.closely_related_to);
    union_into(
        &mut merged.subspecies_varieties,
        &imported.subspecies_varieties,
    );
    union_into(&mut merged.external_links, &imported.external_links);
    merged.is_hybrid = existing.is_hybrid || imported.is_hybrid;

    let mut conflicts = Vec::new();
    let mut pending = Vec::new();
    for ((field, slot), incoming) in scalar_slots(&mut merged)
        .into_iter()
        .zip(scalar_values(imported))
    {
        let Some(incoming) = incoming.filter(|v| !v.is_empty()) else {
            continue;
        };
        match slot.as_deref() {
            None | Some("") => *slot = Some(incoming.to_string()),
            Some(current) if current == incoming => {}
            Some(current) => {
                conflicts.push(MergeConflict::new(field, current, incoming));
                pending.push(slot);
            }
        }
    }

    let mut decisions = Vec::with_capacity(conflicts.len());
    for conflict in &conflicts {
        let take = match policy {
            ConflictPolicy::PreferExisting => Some(false),
            ConflictPolicy::PreferImported => Some(true),
            ConflictPolicy::Skip | ConflictPolicy::Fail => None,
            ConflictPolicy::Ask(resolver) => match resolver.resolve(&existing.name, conflict) {
                Resolution::KeepExisting => Some(false),
                Resolution::TakeImported => Some(true),
                Resolution::SkipRecord => None,
            },
        };
        match take {
            Some(take) => decisions.push(take),
            None => break,
        }
    }
    if decisions.len() < conflicts.len() {
        return if matches!(policy, ConflictPolicy::Fail) {
            MergeResult::Failed { conflicts }
        } else {
            MergeResult::Skipped { conflicts }
        };
    }

    for ((slot, conflict), take) in pending.into_iter().zip(&conflicts).zip(decisions) {
        if take {
            *slot = Some(conflict.imported.clone());
        }
    }

    MergeResult::Merged {
        entry: merged,
        conflicts,
    }
}
