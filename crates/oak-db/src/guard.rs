//! Cascade guard.
//!
//! An entry cannot be deleted while another entry names it as a parent.
//! The check runs on the delete's own write transaction, so no new reference
//! can appear between the check and the delete.

use libsql::Connection;
use oak_core::errors::CoreError;
use tracing::debug;

use crate::error::{DatabaseError, ServiceError};
use crate::service::OakService;

/// Names of entries whose `parent1` or `parent2` is `name`, ordered by name.
/// A self-reference is not included.
pub(crate) async fn referencing_names(
    conn: &Connection,
    name: &str,
) -> Result<Vec<String>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT scientific_name FROM oak_entries
             WHERE (parent1 = ?1 OR parent2 = ?1) AND scientific_name <> ?1
             ORDER BY scientific_name",
            [name],
        )
        .await?;
    let mut names = Vec::new();
    while let Some(row) = rows.next().await? {
        names.push(row.get::<String>(0)?);
    }
    Ok(names)
}

/// Fail with `CoreError::Blocked` if any entry still references `name`.
pub(crate) async fn ensure_deletable(conn: &Connection, name: &str) -> Result<(), ServiceError> {
    let blocking_hybrids = referencing_names(conn, name).await?;
    debug!(name, blocking = blocking_hybrids.len(), "cascade guard checked");
    if blocking_hybrids.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Blocked {
            name: name.to_string(),
            blocking_hybrids,
        }
        .into())
    }
}

impl OakService {
    /// Entries that would block deleting `name`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn blocking_hybrids(&self, name: &str) -> Result<Vec<String>, DatabaseError> {
        let conn = self.db().read().await;
        referencing_names(&conn, name).await
    }
}
