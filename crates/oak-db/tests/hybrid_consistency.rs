//! Hybrid relationship consistency across create, update, delete, and import.
//!
//! After every operation, each stored entry's `hybrids` list must equal the
//! set of stored entries naming it as `parent1` or `parent2`.

use std::collections::{BTreeMap, BTreeSet};

use pretty_assertions::assert_eq;

use oak_config::GeneralConfig;
use oak_core::entities::{Entry, EntryFilter};
use oak_core::errors::CoreError;
use oak_core::merge::ConflictPolicy;
use oak_db::service::OakService;
use oak_db::updates::entry::EntryUpdateBuilder;
use oak_schema::AcceptAll;

async fn test_service() -> OakService {
    OakService::new_local(":memory:", GeneralConfig::default())
        .await
        .unwrap()
}

fn species(name: &str) -> Entry {
    Entry::new(name)
}

fn hybrid(name: &str, parent1: Option<&str>, parent2: Option<&str>) -> Entry {
    Entry {
        is_hybrid: true,
        parent1: parent1.map(String::from),
        parent2: parent2.map(String::from),
        ..Entry::new(name)
    }
}

async fn hybrids_of(svc: &OakService, name: &str) -> Vec<String> {
    svc.get_entry(name).await.unwrap().hybrids
}

/// Check the reverse index over the whole store.
async fn assert_consistent(svc: &OakService) {
    let page = svc
        .list_entries(&EntryFilter::default(), Some(500), 0)
        .await
        .unwrap();
    let stored: BTreeSet<String> = page.items.iter().map(|e| e.name.clone()).collect();

    let mut expected: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in &page.items {
        for parent in entry.parent_set() {
            if stored.contains(&parent) {
                expected.entry(parent).or_default().insert(entry.name.clone());
            }
        }
    }
    for entry in &page.items {
        let actual: BTreeSet<String> = entry.hybrids.iter().cloned().collect();
        assert_eq!(
            actual.len(),
            entry.hybrids.len(),
            "duplicate hybrids on {}",
            entry.name
        );
        assert_eq!(
            actual,
            expected.remove(&entry.name).unwrap_or_default(),
            "hybrids of {}",
            entry.name
        );
    }
}

async fn seed_bebbiana(svc: &OakService) {
    svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
    svc.create_entry(species("macrocarpa"), &AcceptAll)
        .await
        .unwrap();
    svc.create_entry(
        hybrid("× bebbiana", Some("alba"), Some("macrocarpa")),
        &AcceptAll,
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Propagation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn creating_hybrid_links_both_parents() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;

    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× bebbiana"]);
    assert_eq!(hybrids_of(&svc, "macrocarpa").await, vec!["× bebbiana"]);
    assert!(hybrids_of(&svc, "× bebbiana").await.is_empty());
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn changing_a_parent_moves_the_hybrid() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;
    svc.create_entry(species("rubra"), &AcceptAll).await.unwrap();

    svc.update_entry(
        "× bebbiana",
        EntryUpdateBuilder::new()
            .parent2(Some("rubra".into()))
            .build(),
        &AcceptAll,
    )
    .await
    .unwrap();

    assert!(hybrids_of(&svc, "macrocarpa").await.is_empty());
    assert_eq!(hybrids_of(&svc, "rubra").await, vec!["× bebbiana"]);
    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn removing_a_parent_unlinks_it() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;

    svc.update_entry(
        "× bebbiana",
        EntryUpdateBuilder::new().parent1(None).build(),
        &AcceptAll,
    )
    .await
    .unwrap();

    assert!(hybrids_of(&svc, "alba").await.is_empty());
    assert_eq!(hybrids_of(&svc, "macrocarpa").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn same_parent_twice_is_listed_once() {
    let svc = test_service().await;
    svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
    svc.create_entry(hybrid("× odd", Some("alba"), Some("alba")), &AcceptAll)
        .await
        .unwrap();

    svc.save_entry(hybrid("× odd", Some("alba"), Some("alba")))
        .await
        .unwrap();

    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× odd"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn resaving_unchanged_entry_does_not_duplicate() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;

    for _ in 0..3 {
        svc.save_entry(hybrid("× bebbiana", Some("alba"), Some("macrocarpa")))
            .await
            .unwrap();
    }

    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn missing_parent_is_backfilled_on_create() {
    let svc = test_service().await;
    svc.create_entry(hybrid("× bebbiana", Some("alba"), None), &AcceptAll)
        .await
        .unwrap();

    let alba = svc.create_entry(species("alba"), &AcceptAll).await.unwrap();

    assert_eq!(alba.hybrids, vec!["× bebbiana"]);
    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn caller_supplied_hybrids_are_ignored() {
    let svc = test_service().await;
    let mut alba = species("alba");
    alba.hybrids = vec!["× invented".into()];

    let created = svc.create_entry(alba.clone(), &AcceptAll).await.unwrap();
    assert!(created.hybrids.is_empty());

    svc.save_entry(alba.clone()).await.unwrap();
    assert!(hybrids_of(&svc, "alba").await.is_empty());

    svc.import_batch(vec![alba], &mut ConflictPolicy::PreferImported, &AcceptAll)
        .await;
    assert!(hybrids_of(&svc, "alba").await.is_empty());
    assert_consistent(&svc).await;
}

// ---------------------------------------------------------------------------
// Delete guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_parent_blocked_until_reference_removed() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;

    let err = svc.delete_entry("alba").await.unwrap_err();
    match err.as_domain() {
        Some(CoreError::Blocked {
            name,
            blocking_hybrids,
        }) => {
            assert_eq!(name, "alba");
            assert_eq!(blocking_hybrids, &vec!["× bebbiana".to_string()]);
        }
        other => panic!("expected Blocked, got {other:?}"),
    }
    assert!(svc.entry_exists("alba").await.unwrap());

    svc.update_entry(
        "× bebbiana",
        EntryUpdateBuilder::new().parent1(None).build(),
        &AcceptAll,
    )
    .await
    .unwrap();
    assert!(hybrids_of(&svc, "alba").await.is_empty());

    svc.delete_entry("alba").await.unwrap();
    assert!(!svc.entry_exists("alba").await.unwrap());
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn blocked_error_lists_every_blocking_hybrid() {
    let svc = test_service().await;
    svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
    svc.create_entry(hybrid("× jackiana", Some("alba"), None), &AcceptAll)
        .await
        .unwrap();
    svc.create_entry(hybrid("× bebbiana", None, Some("alba")), &AcceptAll)
        .await
        .unwrap();

    assert_eq!(
        svc.blocking_hybrids("alba").await.unwrap(),
        vec!["× bebbiana", "× jackiana"]
    );
    let err = svc.delete_entry("alba").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Cannot delete 'alba': still a parent of × bebbiana, × jackiana"
    );
}

#[tokio::test]
async fn deleting_a_hybrid_unlinks_its_parents() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;

    svc.delete_entry("× bebbiana").await.unwrap();

    assert!(hybrids_of(&svc, "alba").await.is_empty());
    assert!(hybrids_of(&svc, "macrocarpa").await.is_empty());
    svc.delete_entry("alba").await.unwrap();
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn delete_missing_entry_is_not_found() {
    let svc = test_service().await;
    let err = svc.delete_entry("ghost").await.unwrap_err();
    assert!(matches!(err.as_domain(), Some(CoreError::NotFound { .. })));
}

// ---------------------------------------------------------------------------
// Atomicity
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_save_leaves_parents_untouched() {
    let svc = test_service().await;
    svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
    svc.db()
        .conn()
        .execute(
            "CREATE TRIGGER reject_boom BEFORE INSERT ON oak_entries
             WHEN NEW.scientific_name = '× boom'
             BEGIN SELECT RAISE(ABORT, 'boom'); END",
            (),
        )
        .await
        .unwrap();

    let result = svc
        .create_entry(hybrid("× boom", Some("alba"), None), &AcceptAll)
        .await;

    assert!(result.is_err());
    assert!(!result.unwrap_err().is_domain());
    assert!(hybrids_of(&svc, "alba").await.is_empty());
    assert!(!svc.entry_exists("× boom").await.unwrap());

    // The store is still usable after the rollback.
    svc.create_entry(hybrid("× fine", Some("alba"), None), &AcceptAll)
        .await
        .unwrap();
    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× fine"]);
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

#[tokio::test]
async fn imported_hybrid_links_parents() {
    let svc = test_service().await;
    let summary = svc
        .import_batch(
            vec![
                species("alba"),
                hybrid("× bebbiana", Some("alba"), Some("macrocarpa")),
                species("macrocarpa"),
            ],
            &mut ConflictPolicy::PreferExisting,
            &AcceptAll,
        )
        .await;

    assert_eq!(summary.imported, 3);
    assert_eq!(hybrids_of(&svc, "alba").await, vec!["× bebbiana"]);
    assert_eq!(hybrids_of(&svc, "macrocarpa").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}

#[tokio::test]
async fn imported_parent_change_is_propagated() {
    let svc = test_service().await;
    seed_bebbiana(&svc).await;
    svc.create_entry(species("rubra"), &AcceptAll).await.unwrap();

    let summary = svc
        .import_batch(
            vec![hybrid("× bebbiana", Some("alba"), Some("rubra"))],
            &mut ConflictPolicy::PreferImported,
            &AcceptAll,
        )
        .await;

    assert_eq!(summary.imported, 1);
    assert!(hybrids_of(&svc, "macrocarpa").await.is_empty());
    assert_eq!(hybrids_of(&svc, "rubra").await, vec!["× bebbiana"]);
    assert_consistent(&svc).await;
}
