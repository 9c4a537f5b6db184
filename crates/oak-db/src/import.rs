//! Bulk import of externally sourced entries.
//!
//! Each record is written on its own write transaction: a record that fails
//! validation, hits an unresolved conflict, or errors in storage is reported
//! in the summary and the batch moves on. Created and merged records are
//! saved through the consistency engine like any other write, and imported
//! `hybrids` values are never used.

use oak_core::entities::Entry;
use oak_core::enums::{AuditAction, EntityType};
use oak_core::errors::CoreError;
use oak_core::import::{ImportDetail, ImportOutcome, ImportSummary};
use oak_core::merge::{ConflictPolicy, MergeResult, merge_entries};
use oak_schema::EntryValidator;
use tracing::{debug, info, warn};

use crate::error::ServiceError;
use crate::relations::save_with_propagation;
use crate::repos::audit;
use crate::repos::entry::find_entry_in;
use crate::service::OakService;

/// Attempts before giving up on an entry that keeps changing under a merge.
const MAX_MERGE_ATTEMPTS: u32 = 3;

impl OakService {
    /// Import `records` under `policy`, checking each with `validator`.
    pub async fn import_batch(
        &self,
        records: Vec<Entry>,
        policy: &mut ConflictPolicy<'_>,
        validator: &dyn EntryValidator,
    ) -> ImportSummary {
        self.import_batch_with(records, policy, validator, |_| {})
            .await
    }

    /// Like [`Self::import_batch`], calling `on_record` after each record.
    pub async fn import_batch_with<F>(
        &self,
        records: Vec<Entry>,
        policy: &mut ConflictPolicy<'_>,
        validator: &dyn EntryValidator,
        mut on_record: F,
    ) -> ImportSummary
    where
        F: FnMut(&ImportDetail),
    {
        let mut summary = ImportSummary::default();
        for record in records {
            let record = record.normalized();
            let name = record.name.clone();
            let outcome = match self.import_one(record, policy, validator).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(name, error = %e, "import record failed");
                    ImportOutcome::Errored {
                        reason: e.to_string(),
                        conflicts: Vec::new(),
                    }
                }
            };
            debug!(name, outcome = outcome.label(), "import record handled");
            summary.record(name, outcome);
            if let Some(detail) = summary.details.last() {
                on_record(detail);
            }
        }

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            errors = summary.errors,
            policy = %policy.strategy(),
            "import finished"
        );
        summary
    }

    /// Merge against a snapshot read without the write lock, so a resolver
    /// that prompts does not hold the store. The write re-reads the entry and
    /// starts over if it changed in between.
    async fn import_one(
        &self,
        record: Entry,
        policy: &mut ConflictPolicy<'_>,
        validator: &dyn EntryValidator,
    ) -> Result<ImportOutcome, ServiceError> {
        validator.validate(&record)?;

        for attempt in 1..=MAX_MERGE_ATTEMPTS {
            let snapshot = {
                let conn = self.db().read().await;
                find_entry_in(&conn, &record.name).await?
            };
            let plan = match &snapshot {
                None => MergeResult::Merged {
                    entry: record.clone(),
                    conflicts: Vec::new(),
                },
                Some(existing) => merge_entries(existing, &record, policy),
            };
            match self.apply_import(snapshot.as_ref(), plan).await? {
                Some(outcome) => return Ok(outcome),
                None => {
                    debug!(name = %record.name, attempt, "entry changed during merge, retrying");
                }
            }
        }

        Err(CoreError::Other(anyhow::anyhow!(
            "'{}' kept changing during import; gave up after {MAX_MERGE_ATTEMPTS} attempts",
            record.name
        ))
        .into())
    }

    /// Write a merge plan computed against `snapshot`.
    ///
    /// Returns `None`, writing nothing, if the stored entry no longer matches
    /// `snapshot`.
    async fn apply_import(
        &self,
        snapshot: Option<&Entry>,
        plan: MergeResult,
    ) -> Result<Option<ImportOutcome>, ServiceError> {
        let (mut entry, conflicts) = match plan {
            MergeResult::Merged { entry, conflicts } => (entry, conflicts),
            MergeResult::Skipped { conflicts } => {
                return Ok(Some(ImportOutcome::Skipped { conflicts }));
            }
            MergeResult::Failed { conflicts } => {
                let reason = conflicts.first().map_or_else(
                    || "merge failed".to_string(),
                    |c| CoreError::MergeConflict(c.clone()).to_string(),
                );
                return Ok(Some(ImportOutcome::Errored { reason, conflicts }));
            }
        };

        let tx = self.db().begin_write().await?;
        let current = find_entry_in(&tx, &entry.name).await?;
        if current.as_ref() != snapshot {
            return Ok(None);
        }

        let (action, detail, outcome) = if current.is_some() {
            (
                AuditAction::Merged,
                serde_json::json!({ "conflicts": conflicts }),
                ImportOutcome::Merged { conflicts },
            )
        } else {
            (
                AuditAction::Created,
                serde_json::json!({ "via": "import" }),
                ImportOutcome::Created,
            )
        };
        save_with_propagation(&tx, current.as_ref(), &mut entry).await?;
        audit::record(&tx, EntityType::Entry, &entry.name, action, Some(detail)).await?;
        tx.commit().await?;
        Ok(Some(outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{species, test_service};
    use oak_core::merge::{ConflictResolver, MergeConflict, Resolution};
    use oak_schema::{AcceptAll, SchemaValidator, Vocabulary};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn creates_missing_and_merges_existing() {
        let svc = test_service().await;
        let mut alba = species("alba");
        alba.synonyms = vec!["s1".into(), "s2".into()];
        svc.save_entry(alba).await.unwrap();

        let mut incoming = species("alba");
        incoming.synonyms = vec!["s2".into(), "s3".into()];
        let summary = svc
            .import_batch(
                vec![incoming, species("rubra")],
                &mut ConflictPolicy::Fail,
                &AcceptAll,
            )
            .await;

        assert_eq!(summary.imported, 2);
        assert_eq!(summary.details[0].outcome, ImportOutcome::Merged {
            conflicts: Vec::new()
        });
        assert_eq!(summary.details[1].outcome, ImportOutcome::Created);
        assert_eq!(
            svc.get_entry("alba").await.unwrap().synonyms,
            vec!["s1", "s2", "s3"]
        );
    }

    #[tokio::test]
    async fn fail_policy_reports_conflict_and_writes_nothing() {
        let svc = test_service().await;
        let mut alba = species("alba");
        alba.author = Some("Y".into());
        svc.save_entry(alba).await.unwrap();

        let mut incoming = species("alba");
        incoming.author = Some("X".into());
        incoming.synonyms = vec!["new".into()];
        let summary = svc
            .import_batch(vec![incoming], &mut ConflictPolicy::Fail, &AcceptAll)
            .await;

        assert_eq!(summary.errors, 1);
        let ImportOutcome::Errored { reason, conflicts } = &summary.details[0].outcome else {
            panic!("expected errored outcome");
        };
        assert!(reason.contains("author"));
        assert_eq!(conflicts, &vec![MergeConflict::new("author", "Y", "X")]);
        assert!(svc.get_entry("alba").await.unwrap().synonyms.is_empty());
    }

    #[tokio::test]
    async fn invalid_record_is_errored_and_batch_continues() {
        let svc = test_service().await;
        let validator = SchemaValidator::new(Vocabulary::default());
        let mut bad = species("alba");
        bad.subgenus = Some("Nope".into());

        let summary = svc
            .import_batch(
                vec![bad, species("rubra")],
                &mut ConflictPolicy::PreferExisting,
                &validator,
            )
            .await;

        assert_eq!(summary.errors, 1);
        assert_eq!(summary.imported, 1);
        assert!(svc.find_entry("alba").await.unwrap().is_none());
        assert!(svc.find_entry("rubra").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn stale_snapshot_writes_nothing() {
        let svc = test_service().await;
        svc.save_entry(species("alba")).await.unwrap();
        let snapshot = svc.get_entry("alba").await.unwrap();

        let mut changed = species("alba");
        changed.author = Some("L.".into());
        svc.save_entry(changed).await.unwrap();

        let mut planned = snapshot.clone();
        planned.synonyms = vec!["stale".into()];
        let applied = svc
            .apply_import(
                Some(&snapshot),
                MergeResult::Merged {
                    entry: planned,
                    conflicts: Vec::new(),
                },
            )
            .await
            .unwrap();

        assert_eq!(applied, None);
        let stored = svc.get_entry("alba").await.unwrap();
        assert_eq!(stored.author.as_deref(), Some("L."));
        assert!(stored.synonyms.is_empty());
    }

    /// Saves a concurrent edit the first time it is asked, then takes the
    /// imported value.
    struct EditsWhileAsked<'a> {
        svc: &'a OakService,
        asked: u32,
    }

    impl ConflictResolver for EditsWhileAsked<'_> {
        fn resolve(&mut self, _entry_name: &str, _conflict: &MergeConflict) -> Resolution {
            self.asked += 1;
            if self.asked == 1 {
                let svc = self.svc;
                tokio::task::block_in_place(|| {
                    tokio::runtime::Handle::current().block_on(async {
                        let mut alba = svc.get_entry("alba").await.unwrap();
                        alba.synonyms.push("concurrent".into());
                        svc.save_entry(alba).await.unwrap();
                    });
                });
            }
            Resolution::TakeImported
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn store_stays_writable_while_resolver_asks() {
        let svc = test_service().await;
        let mut alba = species("alba");
        alba.author = Some("Y".into());
        svc.save_entry(alba).await.unwrap();

        let mut incoming = species("alba");
        incoming.author = Some("X".into());
        let mut resolver = EditsWhileAsked { svc: &svc, asked: 0 };
        let summary = svc
            .import_batch(
                vec![incoming],
                &mut ConflictPolicy::Ask(&mut resolver),
                &AcceptAll,
            )
            .await;

        assert_eq!(summary.imported, 1);
        assert_eq!(resolver.asked, 2);
        let stored = svc.get_entry("alba").await.unwrap();
        assert_eq!(stored.author.as_deref(), Some("X"));
        assert_eq!(stored.synonyms, vec!["concurrent"]);
    }

    #[tokio::test]
    async fn progress_callback_sees_every_record() {
        let svc = test_service().await;
        let mut seen = Vec::new();
        svc.import_batch_with(
            vec![species("alba"), species("rubra")],
            &mut ConflictPolicy::PreferExisting,
            &AcceptAll,
            |detail| seen.push(detail.name.clone()),
        )
        .await;
        assert_eq!(seen, vec!["alba", "rubra"]);
    }
}
