//! Source-record repository: per-entry descriptive data attributed to a source.
//!
//! Records cascade with their entry on delete. At most one record per entry
//! is marked preferred.

use libsql::Connection;
use oak_core::entities::SourceRecord;
use oak_core::enums::{AuditAction, EntityType};
use oak_core::errors::CoreError;
use oak_core::responses::EntryWithSources;
use tracing::info;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::{get_bool, get_json_list, get_opt_string, to_json_list};
use crate::repos::audit;
use crate::repos::entry::find_entry_in;
use crate::repos::source::find_source_in;
use crate::service::OakService;

const RECORD_COLUMNS: &str = "id, scientific_name, source_id, local_names, range, growth_habit, \
     leaves, flowers, fruits, bark, twigs, buds, hardiness_habitat, miscellaneous, url, \
     is_preferred";

fn row_to_record(row: &libsql::Row) -> Result<SourceRecord, DatabaseError> {
    Ok(SourceRecord {
        id: row.get::<i64>(0)?,
        scientific_name: row.get::<String>(1)?,
        source_id: row.get::<i64>(2)?,
        local_names: get_json_list(row, 3)?,
        range: get_opt_string(row, 4)?,
        growth_habit: get_opt_string(row, 5)?,
        leaves: get_opt_string(row, 6)?,
        flowers: get_opt_string(row, 7)?,
        fruits: get_opt_string(row, 8)?,
        bark: get_opt_string(row, 9)?,
        twigs: get_opt_string(row, 10)?,
        buds: get_opt_string(row, 11)?,
        hardiness_habitat: get_opt_string(row, 12)?,
        miscellaneous: get_opt_string(row, 13)?,
        url: get_opt_string(row, 14)?,
        is_preferred: get_bool(row, 15)?,
    })
}

async fn find_record_in(
    conn: &Connection,
    name: &str,
    source_id: i64,
) -> Result<Option<SourceRecord>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM species_sources
                 WHERE scientific_name = ?1 AND source_id = ?2"
            ),
            libsql::params![name, source_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_record(&row)?)),
        None => Ok(None),
    }
}

async fn list_records_in(
    conn: &Connection,
    name: &str,
) -> Result<Vec<SourceRecord>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM species_sources
                 WHERE scientific_name = ?1
                 ORDER BY is_preferred DESC, source_id"
            ),
            [name],
        )
        .await?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok(records)
}

/// Every record in the store, grouped by entry, preferred first.
pub(crate) async fn all_records_in(conn: &Connection) -> Result<Vec<SourceRecord>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {RECORD_COLUMNS} FROM species_sources
                 ORDER BY scientific_name, is_preferred DESC, source_id"
            ),
            (),
        )
        .await?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(row_to_record(&row)?);
    }
    Ok(records)
}

impl OakService {
    /// Insert or replace the record for `(scientific_name, source_id)`.
    ///
    /// Marking a record preferred clears the flag on the entry's other records.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the entry or the source is not stored.
    pub async fn save_source_record(
        &self,
        record: SourceRecord,
    ) -> Result<SourceRecord, ServiceError> {
        let name = record.scientific_name.as_str();
        let tx = self.db().begin_write().await?;

        if find_entry_in(&tx, name).await?.is_none() {
            return Err(CoreError::not_found(EntityType::Entry, name).into());
        }
        if find_source_in(&tx, record.source_id).await?.is_none() {
            return Err(
                CoreError::not_found(EntityType::Source, record.source_id.to_string()).into(),
            );
        }

        if record.is_preferred {
            tx.execute(
                "UPDATE species_sources SET is_preferred = 0
                 WHERE scientific_name = ?1 AND source_id <> ?2",
                libsql::params![name, record.source_id],
            )
            .await?;
        }

        tx.execute(
            "INSERT INTO species_sources (scientific_name, source_id, local_names, range,
                 growth_habit, leaves, flowers, fruits, bark, twigs, buds, hardiness_habitat,
                 miscellaneous, url, is_preferred)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(scientific_name, source_id) DO UPDATE SET
                 local_names = excluded.local_names,
                 range = excluded.range,
                 growth_habit = excluded.growth_habit,
                 leaves = excluded.leaves,
                 flowers = excluded.flowers,
                 fruits = excluded.fruits,
                 bark = excluded.bark,
                 twigs = excluded.twigs,
                 buds = excluded.buds,
                 hardiness_habitat = excluded.hardiness_habitat,
                 miscellaneous = excluded.miscellaneous,
                 url = excluded.url,
                 is_preferred = excluded.is_preferred",
            libsql::params![
                name,
                record.source_id,
                to_json_list(&record.local_names)?,
                record.range.as_deref(),
                record.growth_habit.as_deref(),
                record.leaves.as_deref(),
                record.flowers.as_deref(),
                record.fruits.as_deref(),
                record.bark.as_deref(),
                record.twigs.as_deref(),
                record.buds.as_deref(),
                record.hardiness_habitat.as_deref(),
                record.miscellaneous.as_deref(),
                record.url.as_deref(),
                i64::from(record.is_preferred)
            ],
        )
        .await?;

        audit::record(
            &tx,
            EntityType::Entry,
            name,
            AuditAction::SourceAttached,
            Some(serde_json::json!({
                "source_id": record.source_id,
                "is_preferred": record.is_preferred,
            })),
        )
        .await?;
        let saved = find_record_in(&tx, name, record.source_id)
            .await?
            .ok_or(DatabaseError::NoResult)?;
        tx.commit().await?;

        info!(name, source_id = record.source_id, "source record saved");
        Ok(saved)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if there is no such record.
    pub async fn get_source_record(
        &self,
        name: &str,
        source_id: i64,
    ) -> Result<SourceRecord, ServiceError> {
        let conn = self.db().read().await;
        find_record_in(&conn, name, source_id)
            .await?
            .ok_or_else(|| {
                CoreError::not_found(EntityType::SourceRecord, format!("{name}/{source_id}"))
                    .into()
            })
    }

    /// Records for an entry, preferred first, then by source id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_source_records(
        &self,
        name: &str,
    ) -> Result<Vec<SourceRecord>, DatabaseError> {
        let conn = self.db().read().await;
        list_records_in(&conn, name).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn preferred_source_record(
        &self,
        name: &str,
    ) -> Result<Option<SourceRecord>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM species_sources
                     WHERE scientific_name = ?1 AND is_preferred = 1"
                ),
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if there is no such record.
    pub async fn delete_source_record(
        &self,
        name: &str,
        source_id: i64,
    ) -> Result<(), ServiceError> {
        let tx = self.db().begin_write().await?;
        let deleted = tx
            .execute(
                "DELETE FROM species_sources WHERE scientific_name = ?1 AND source_id = ?2",
                libsql::params![name, source_id],
            )
            .await?;
        if deleted == 0 {
            return Err(CoreError::not_found(
                EntityType::SourceRecord,
                format!("{name}/{source_id}"),
            )
            .into());
        }
        audit::record(
            &tx,
            EntityType::Entry,
            name,
            AuditAction::SourceDetached,
            Some(serde_json::json!({ "source_id": source_id })),
        )
        .await?;
        tx.commit().await?;
        Ok(())
    }

    /// An entry with all of its source records.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the entry is not stored.
    pub async fn get_entry_with_sources(
        &self,
        name: &str,
    ) -> Result<EntryWithSources, ServiceError> {
        let conn = self.db().read().await;
        let entry = find_entry_in(&conn, name)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Entry, name))?;
        let sources = list_records_in(&conn, name).await?;
        Ok(EntryWithSources { entry, sources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{record, source, species, test_service};
    use oak_schema::AcceptAll;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn save_requires_entry_and_source() {
        let svc = test_service().await;
        let src = svc.create_source(source("eFloras")).await.unwrap();

        let err = svc
            .save_source_record(record("alba", src.id))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::NotFound { .. })));

        svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
        let err = svc
            .save_source_record(record("alba", src.id + 100))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn save_upserts_by_entry_and_source() {
        let svc = test_service().await;
        svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
        let src = svc.create_source(source("eFloras")).await.unwrap();

        let mut first = record("alba", src.id);
        first.leaves = Some("lobed".into());
        let saved = svc.save_source_record(first).await.unwrap();

        let mut second = record("alba", src.id);
        second.bark = Some("light gray".into());
        let replaced = svc.save_source_record(second).await.unwrap();

        assert_eq!(replaced.id, saved.id);
        assert_eq!(replaced.leaves, None);
        assert_eq!(replaced.bark.as_deref(), Some("light gray"));
        assert_eq!(svc.list_source_records("alba").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn only_one_preferred_record() {
        let svc = test_service().await;
        svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
        let a = svc.create_source(source("Oaks of the World")).await.unwrap();
        let b = svc.create_source(source("eFloras")).await.unwrap();

        let mut ra = record("alba", a.id);
        ra.is_preferred = true;
        svc.save_source_record(ra).await.unwrap();
        let mut rb = record("alba", b.id);
        rb.is_preferred = true;
        svc.save_source_record(rb).await.unwrap();

        let preferred = svc.preferred_source_record("alba").await.unwrap().unwrap();
        assert_eq!(preferred.source_id, b.id);

        let listed = svc.list_source_records("alba").await.unwrap();
        assert_eq!(listed[0].source_id, b.id);
        assert!(!listed[1].is_preferred);
    }

    #[tokio::test]
    async fn delete_record_and_not_found() {
        let svc = test_service().await;
        svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
        let src = svc.create_source(source("eFloras")).await.unwrap();
        svc.save_source_record(record("alba", src.id)).await.unwrap();

        svc.delete_source_record("alba", src.id).await.unwrap();
        assert!(matches!(
            svc.get_source_record("alba", src.id).await,
            Err(ServiceError::Domain(CoreError::NotFound { .. }))
        ));
        assert!(matches!(
            svc.delete_source_record("alba", src.id).await,
            Err(ServiceError::Domain(CoreError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn entry_with_sources_bundles_records() {
        let svc = test_service().await;
        svc.create_entry(species("alba"), &AcceptAll).await.unwrap();
        let src = svc.create_source(source("eFloras")).await.unwrap();
        svc.save_source_record(record("alba", src.id)).await.unwrap();

        let bundle = svc.get_entry_with_sources("alba").await.unwrap();
        assert_eq!(bundle.entry.name, "alba");
        assert_eq!(bundle.sources.len(), 1);
    }
}
