//! Hybrid consistency engine.
//!
//! Keeps every entry's `hybrids` list equal to the set of stored entries that
//! name it as `parent1` or `parent2`. It is the only writer of `hybrids` and
//! always runs on the caller's write transaction, so a failure anywhere rolls
//! back the parents' lists together with the entry itself.
//!
//! A parent that is not stored is skipped and the reference is kept; its
//! `hybrids` list is backfilled when that parent is created later.

use libsql::Connection;
use oak_core::entities::Entry;
use oak_core::enums::{AuditAction, EntityType};
use tracing::{debug, warn};

use crate::error::DatabaseError;
use crate::guard::referencing_names;
use crate::repos::audit;
use crate::repos::entry::{read_hybrids, write_entry, write_hybrids};

/// Persist `new`, propagating parent-reference changes relative to `old`.
///
/// `new.hybrids` is overwritten: kept from `old` on update, derived from the
/// referencing entries on first creation.
pub(crate) async fn save_with_propagation(
    conn: &Connection,
    old: Option<&Entry>,
    new: &mut Entry,
) -> Result<(), DatabaseError> {
    new.hybrids = match old {
        Some(old) => old.hybrids.clone(),
        None => referencing_names(conn, &new.name).await?,
    };

    let old_parents = old.map(Entry::parent_set).unwrap_or_default();
    let new_parents = new.parent_set();
    let name = new.name.clone();

    for parent in old_parents.difference(&new_parents) {
        if *parent == name {
            new.hybrids.retain(|h| *h != name);
            continue;
        }
        unlink(conn, parent, &name).await?;
    }
    for parent in new_parents.difference(&old_parents) {
        if *parent == name {
            if !new.hybrids.contains(&name) {
                new.hybrids.push(name.clone());
            }
            continue;
        }
        link(conn, parent, &name).await?;
    }

    write_entry(conn, new).await
}

/// Remove a deleted entry from its parents' `hybrids` lists.
pub(crate) async fn detach_from_parents(
    conn: &Connection,
    removed: &Entry,
) -> Result<(), DatabaseError> {
    for parent in removed.parent_set() {
        if parent != removed.name {
            unlink(conn, &parent, &removed.name).await?;
        }
    }
    Ok(())
}

async fn link(conn: &Connection, parent: &str, hybrid: &str) -> Result<(), DatabaseError> {
    let Some(mut hybrids) = read_hybrids(conn, parent).await? else {
        warn!(parent, hybrid, "parent not stored, keeping dangling reference");
        return Ok(());
    };
    if hybrids.iter().any(|h| h == hybrid) {
        return Ok(());
    }
    hybrids.push(hybrid.to_string());
    write_hybrids(conn, parent, &hybrids).await?;
    audit::record(
        conn,
        EntityType::Entry,
        parent,
        AuditAction::HybridLinked,
        Some(serde_json::json!({ "hybrid": hybrid })),
    )
    .await?;
    debug!(parent, hybrid, "hybrid linked");
    Ok(())
}

async fn unlink(conn: &Connection, parent: &str, hybrid: &str) -> Result<(), DatabaseError> {
    let Some(mut hybrids) = read_hybrids(conn, parent).await? else {
        warn!(parent, hybrid, "parent not stored, nothing to unlink");
        return Ok(());
    };
    let before = hybrids.len();
    hybrids.retain(|h| h != hybrid);
    if hybrids.len() == before {
        return Ok(());
    }
    write_hybrids(conn, parent, &hybrids).await?;
    audit::record(
        conn,
        EntityType::Entry,
        parent,
        AuditAction::HybridUnlinked,
        Some(serde_json::json!({ "hybrid": hybrid })),
    )
    .await?;
    debug!(parent, hybrid, "hybrid unlinked");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::entry::find_entry_in;
    use crate::test_support::helpers::{hybrid, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn self_parent_is_applied_in_memory() {
        let svc = test_service().await;
        let tx = svc.db().begin_write().await.unwrap();

        let mut odd = hybrid("× odd", Some("× odd"), None);
        save_with_propagation(&tx, None, &mut odd).await.unwrap();
        assert_eq!(odd.hybrids, vec!["× odd"]);

        let old = odd.clone();
        let mut changed = old.clone();
        changed.parent1 = None;
        save_with_propagation(&tx, Some(&old), &mut changed)
            .await
            .unwrap();
        assert!(changed.hybrids.is_empty());

        let stored = find_entry_in(&tx, "× odd").await.unwrap().unwrap();
        assert!(stored.hybrids.is_empty());
    }

    #[tokio::test]
    async fn caller_hybrids_are_replaced() {
        let svc = test_service().await;
        let tx = svc.db().begin_write().await.unwrap();

        let mut alba = Entry::new("alba");
        alba.hybrids = vec!["× made_up".into()];
        save_with_propagation(&tx, None, &mut alba).await.unwrap();
        assert!(alba.hybrids.is_empty());
    }

    #[tokio::test]
    async fn missing_parent_is_skipped() {
        let svc = test_service().await;
        let tx = svc.db().begin_write().await.unwrap();

        let mut h = hybrid("× bebbiana", Some("alba"), Some("macrocarpa"));
        save_with_propagation(&tx, None, &mut h).await.unwrap();

        let stored = find_entry_in(&tx, "× bebbiana").await.unwrap().unwrap();
        assert_eq!(stored.parent1.as_deref(), Some("alba"));
        assert!(find_entry_in(&tx, "alba").await.unwrap().is_none());
    }
}
