//! Entry repository: lookups, listings, and the save/create/update/delete paths.
//!
//! Every write goes through [`crate::relations::save_with_propagation`] on an
//! IMMEDIATE transaction; there is no other way to change `hybrids`.

use libsql::Connection;
use oak_core::entities::{Entry, EntryFilter};
use oak_core::enums::{AuditAction, EntityType};
use oak_core::errors::CoreError;
use oak_core::responses::Page;
use oak_schema::EntryValidator;
use tracing::info;

use crate::error::{DatabaseError, ServiceError};
use crate::guard::ensure_deletable;
use crate::helpers::{escape_like, get_bool, get_json_list, get_opt_string, to_json_list};
use crate::relations::{detach_from_parents, save_with_propagation};
use crate::repos::audit;
use crate::service::OakService;
use crate::updates::entry::EntryUpdate;

const ENTRY_COLUMNS: &str = "scientific_name, author, is_hybrid, conservation_status, \
     subgenus, section, subsection, complex, parent1, parent2, hybrids, \
     closely_related_to, subspecies_varieties, synonyms, external_links";

fn row_to_entry(row: &libsql::Row) -> Result<Entry, DatabaseError> {
    Ok(Entry {
        name: row.get::<String>(0)?,
        author: get_opt_string(row, 1)?,
        is_hybrid: get_bool(row, 2)?,
        conservation_status: get_opt_string(row, 3)?,
        subgenus: get_opt_string(row, 4)?,
        section: get_opt_string(row, 5)?,
        subsection: get_opt_string(row, 6)?,
        complex: get_opt_string(row, 7)?,
        parent1: get_opt_string(row, 8)?,
        parent2: get_opt_string(row, 9)?,
        hybrids: get_json_list(row, 10)?,
        closely_related_to: get_json_list(row, 11)?,
        subspecies_varieties: get_json_list(row, 12)?,
        synonyms: get_json_list(row, 13)?,
        external_links: get_json_list(row, 14)?,
    })
}

pub(crate) async fn find_entry_in(
    conn: &Connection,
    name: &str,
) -> Result<Option<Entry>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {ENTRY_COLUMNS} FROM oak_entries WHERE scientific_name = ?1"),
            [name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_entry(&row)?)),
        None => Ok(None),
    }
}

/// Every entry, ordered by name.
pub(crate) async fn all_entries_in(conn: &Connection) -> Result<Vec<Entry>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {ENTRY_COLUMNS} FROM oak_entries ORDER BY scientific_name"),
            (),
        )
        .await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_entry(&row)?);
    }
    Ok(entries)
}

/// Upsert every column of `entry`.
///
/// `ON CONFLICT DO UPDATE` rather than `INSERT OR REPLACE`: a replace deletes
/// the row first, which would cascade to the entry's source records.
pub(crate) async fn write_entry(conn: &Connection, entry: &Entry) -> Result<(), DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO oak_entries ({ENTRY_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(scientific_name) DO UPDATE SET
                 author = excluded.author,
                 is_hybrid = excluded.is_hybrid,
                 conservation_status = excluded.conservation_status,
                 subgenus = excluded.subgenus,
                 section = excluded.section,
                 subsection = excluded.subsection,
                 complex = excluded.complex,
                 parent1 = excluded.parent1,
                 parent2 = excluded.parent2,
                 hybrids = excluded.hybrids,
                 closely_related_to = excluded.closely_related_to,
                 subspecies_varieties = excluded.subspecies_varieties,
                 synonyms = excluded.synonyms,
                 external_links = excluded.external_links"
        ),
        libsql::params![
            entry.name.as_str(),
            entry.author.as_deref(),
            i64::from(entry.is_hybrid),
            entry.conservation_status.as_deref(),
            entry.subgenus.as_deref(),
            entry.section.as_deref(),
            entry.subsection.as_deref(),
            entry.complex.as_deref(),
            entry.parent1.as_deref(),
            entry.parent2.as_deref(),
            to_json_list(&entry.hybrids)?,
            to_json_list(&entry.closely_related_to)?,
            to_json_list(&entry.subspecies_varieties)?,
            to_json_list(&entry.synonyms)?,
            to_json_list(&entry.external_links)?
        ],
    )
    .await?;
    Ok(())
}

/// The stored `hybrids` list of `name`, or `None` if the entry is not stored.
pub(crate) async fn read_hybrids(
    conn: &Connection,
    name: &str,
) -> Result<Option<Vec<String>>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT hybrids FROM oak_entries WHERE scientific_name = ?1",
            [name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(get_json_list(&row, 0)?)),
        None => Ok(None),
    }
}

pub(crate) async fn write_hybrids(
    conn: &Connection,
    name: &str,
    hybrids: &[String],
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE oak_entries SET hybrids = ?1 WHERE scientific_name = ?2",
        libsql::params![to_json_list(hybrids)?, name],
    )
    .await?;
    Ok(())
}

/// WHERE clause and parameters for an [`EntryFilter`].
fn filter_clause(filter: &EntryFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    for (column, value) in [
        ("subgenus", &filter.subgenus),
        ("section", &filter.section),
        ("subsection", &filter.subsection),
        ("complex", &filter.complex),
    ] {
        if let Some(value) = value {
            params.push(libsql::Value::Text(value.clone()));
            conditions.push(format!("{column} = ?{}", params.len()));
        }
    }
    if let Some(is_hybrid) = filter.is_hybrid {
        params.push(libsql::Value::Integer(i64::from(is_hybrid)));
        conditions.push(format!("is_hybrid = ?{}", params.len()));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };
    (clause, params)
}

impl OakService {
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no entry has this name.
    pub async fn get_entry(&self, name: &str) -> Result<Entry, ServiceError> {
        self.find_entry(name)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Entry, name).into())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_entry(&self, name: &str) -> Result<Option<Entry>, DatabaseError> {
        let conn = self.db().read().await;
        find_entry_in(&conn, name).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn entry_exists(&self, name: &str) -> Result<bool, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                "SELECT 1 FROM oak_entries WHERE scientific_name = ?1",
                [name],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Upsert an entry by name through the consistency engine.
    ///
    /// Returns the entry as stored, with its derived `hybrids`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction fails; nothing is written.
    pub async fn save_entry(&self, entry: Entry) -> Result<Entry, DatabaseError> {
        let mut entry = entry.normalized();
        let tx = self.db().begin_write().await?;
        let old = find_entry_in(&tx, &entry.name).await?;
        save_with_propagation(&tx, old.as_ref(), &mut entry).await?;
        let action = if old.is_some() {
            AuditAction::Updated
        } else {
            AuditAction::Created
        };
        audit::record(&tx, EntityType::Entry, &entry.name, action, None).await?;
        tx.commit().await?;
        info!(name = %entry.name, %action, "entry saved");
        Ok(entry)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `validator` rejects the entry and
    /// `CoreError::AlreadyExists` if the name is taken.
    pub async fn create_entry(
        &self,
        entry: Entry,
        validator: &dyn EntryValidator,
    ) -> Result<Entry, ServiceError> {
        let mut entry = entry.normalized();
        validator.validate(&entry)?;

        let tx = self.db().begin_write().await?;
        if find_entry_in(&tx, &entry.name).await?.is_some() {
            return Err(CoreError::already_exists(EntityType::Entry, &entry.name).into());
        }
        save_with_propagation(&tx, None, &mut entry).await?;
        audit::record(&tx, EntityType::Entry, &entry.name, AuditAction::Created, None).await?;
        tx.commit().await?;

        info!(name = %entry.name, "entry created");
        Ok(entry)
    }

    /// Apply a partial update to a stored entry.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the entry is not stored and
    /// `CoreError::Validation` if the updated entry is rejected.
    pub async fn update_entry(
        &self,
        name: &str,
        update: EntryUpdate,
        validator: &dyn EntryValidator,
    ) -> Result<Entry, ServiceError> {
        let tx = self.db().begin_write().await?;
        let old = find_entry_in(&tx, name)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Entry, name))?;
        if update.is_empty() {
            return Ok(old);
        }

        let mut entry = old.clone();
        update.apply_to(&mut entry);
        let mut entry = entry.normalized();
        validator.validate(&entry)?;

        save_with_propagation(&tx, Some(&old), &mut entry).await?;
        audit::record(
            &tx,
            EntityType::Entry,
            name,
            AuditAction::Updated,
            Some(serde_json::to_value(&update).map_err(DatabaseError::from)?),
        )
        .await?;
        tx.commit().await?;

        info!(name, "entry updated");
        Ok(entry)
    }

    /// Delete an entry and its source records.
    ///
    /// The guard, the removal from parents' `hybrids`, and the deletes share
    /// one transaction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the entry is not stored and
    /// `CoreError::Blocked` listing every entry that still names it as a parent.
    pub async fn delete_entry(&self, name: &str) -> Result<(), ServiceError> {
        let tx = self.db().begin_write().await?;
        let entry = find_entry_in(&tx, name)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Entry, name))?;

        ensure_deletable(&tx, name).await?;
        detach_from_parents(&tx, &entry).await?;

        let source_records = tx
            .execute(
                "DELETE FROM species_sources WHERE scientific_name = ?1",
                [name],
            )
            .await?;
        tx.execute(
            "DELETE FROM oak_entries WHERE scientific_name = ?1",
            [name],
        )
        .await?;
        audit::record(
            &tx,
            EntityType::Entry,
            name,
            AuditAction::Deleted,
            Some(serde_json::json!({ "source_records": source_records })),
        )
        .await?;
        tx.commit().await?;

        info!(name, source_records, "entry deleted");
        Ok(())
    }

    /// Names containing `pattern` as a literal substring, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn search_entries(
        &self,
        pattern: &str,
        limit: Option<u32>,
    ) -> Result<Vec<String>, DatabaseError> {
        let limit = self.clamp_limit(limit);
        let like = format!("%{}%", escape_like(pattern));

        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                "SELECT scientific_name FROM oak_entries
                 WHERE scientific_name LIKE ?1 ESCAPE '\\'
                 ORDER BY scientific_name LIMIT ?2",
                libsql::params![like, i64::from(limit)],
            )
            .await?;
        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    /// One page of entries matching `filter`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_entries(
        &self,
        filter: &EntryFilter,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<Page<Entry>, DatabaseError> {
        let limit = self.clamp_limit(limit);
        let (where_clause, params) = filter_clause(filter);

        let conn = self.db().read().await;
        let total = count_in(&conn, &where_clause, params.clone()).await?;

        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM oak_entries {where_clause}
             ORDER BY scientific_name LIMIT {limit} OFFSET {offset}"
        );
        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_entry(&row)?);
        }

        Ok(Page {
            items,
            total,
            limit,
            offset,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_entries(&self, filter: &EntryFilter) -> Result<u64, DatabaseError> {
        let (where_clause, params) = filter_clause(filter);
        let conn = self.db().read().await;
        count_in(&conn, &where_clause, params).await
    }
}

async fn count_in(
    conn: &Connection,
    where_clause: &str,
    params: Vec<libsql::Value>,
) -> Result<u64, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT COUNT(*) FROM oak_entries {where_clause}"),
            libsql::params_from_iter(params),
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    let count = row.get::<i64>(0)?;
    u64::try_from(count).map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))
}
