//! Source repository: bibliographic and web origins of descriptive data.

use libsql::Connection;
use oak_core::entities::Source;
use oak_core::enums::{AuditAction, EntityType};
use oak_core::errors::CoreError;
use tracing::info;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::get_opt_string;
use crate::repos::audit;
use crate::service::OakService;
use crate::updates::source::SourceUpdate;

const SOURCE_COLUMNS: &str = "id, source_type, name, description, author, year, url, isbn, doi, \
     notes, license, license_url";

fn row_to_source(row: &libsql::Row) -> Result<Source, DatabaseError> {
    Ok(Source {
        id: row.get::<i64>(0)?,
        source_type: row.get::<String>(1)?,
        name: row.get::<String>(2)?,
        description: get_opt_string(row, 3)?,
        author: get_opt_string(row, 4)?,
        year: row
            .get::<Option<i64>>(5)?
            .map(i32::try_from)
            .transpose()
            .map_err(|e| DatabaseError::InvalidState(format!("source year out of range: {e}")))?,
        url: get_opt_string(row, 6)?,
        isbn: get_opt_string(row, 7)?,
        doi: get_opt_string(row, 8)?,
        notes: get_opt_string(row, 9)?,
        license: get_opt_string(row, 10)?,
        license_url: get_opt_string(row, 11)?,
    })
}

pub(crate) async fn find_source_in(
    conn: &Connection,
    id: i64,
) -> Result<Option<Source>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SOURCE_COLUMNS} FROM sources WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_source(&row)?)),
        None => Ok(None),
    }
}

pub(crate) async fn all_sources_in(conn: &Connection) -> Result<Vec<Source>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SOURCE_COLUMNS} FROM sources ORDER BY id"),
            (),
        )
        .await?;
    let mut sources = Vec::new();
    while let Some(row) = rows.next().await? {
        sources.push(row_to_source(&row)?);
    }
    Ok(sources)
}

impl OakService {
    /// Insert a source. The `id` on the input is ignored and assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name or type.
    pub async fn create_source(&self, source: Source) -> Result<Source, ServiceError> {
        if source.name.trim().is_empty() || source.source_type.trim().is_empty() {
            return Err(CoreError::Validation("source needs a name and a type".into()).into());
        }

        let tx = self.db().begin_write().await?;
        tx.execute(
            "INSERT INTO sources (source_type, name, description, author, year, url, isbn, doi,
                                  notes, license, license_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            libsql::params![
                source.source_type.as_str(),
                source.name.as_str(),
                source.description.as_deref(),
                source.author.as_deref(),
                source.year.map(i64::from),
                source.url.as_deref(),
                source.isbn.as_deref(),
                source.doi.as_deref(),
                source.notes.as_deref(),
                source.license.as_deref(),
                source.license_url.as_deref()
            ],
        )
        .await?;
        let id = tx.last_insert_rowid();
        audit::record(
            &tx,
            EntityType::Source,
            &id.to_string(),
            AuditAction::Created,
            None,
        )
        .await?;
        tx.commit().await?;

        info!(id, name = %source.name, "source created");
        Ok(Source { id, ..source })
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no source has this id.
    pub async fn get_source(&self, id: i64) -> Result<Source, ServiceError> {
        let conn = self.db().read().await;
        find_source_in(&conn, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Source, id.to_string()).into())
    }

    /// All sources ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_sources(&self) -> Result<Vec<Source>, DatabaseError> {
        let conn = self.db().read().await;
        all_sources_in(&conn).await
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no source has this id.
    pub async fn update_source(
        &self,
        id: i64,
        update: SourceUpdate,
    ) -> Result<Source, ServiceError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref source_type) = update.source_type {
            params.push(source_type.as_str().into());
            sets.push(format!("source_type = ?{}", params.len()));
        }
        if let Some(ref name) = update.name {
            params.push(name.as_str().into());
            sets.push(format!("name = ?{}", params.len()));
        }
        for (column, value) in [
            ("description", &update.description),
            ("author", &update.author),
            ("url", &update.url),
            ("license", &update.license),
            ("notes", &update.notes),
        ] {
            if let Some(value) = value {
                params.push(value.as_deref().into());
                sets.push(format!("{column} = ?{}", params.len()));
            }
        }
        if let Some(year) = update.year {
            params.push(year.map(i64::from).into());
            sets.push(format!("year = ?{}", params.len()));
        }

        let tx = self.db().begin_write().await?;
        if find_source_in(&tx, id).await?.is_none() {
            return Err(CoreError::not_found(EntityType::Source, id.to_string()).into());
        }
        if !sets.is_empty() {
            params.push(id.into());
            let sql = format!(
                "UPDATE sources SET {} WHERE id = ?{}",
                sets.join(", "),
                params.len()
            );
            tx.execute(&sql, libsql::params_from_iter(params)).await?;
            audit::record(
                &tx,
                EntityType::Source,
                &id.to_string(),
                AuditAction::Updated,
                Some(serde_json::to_value(&update).map_err(DatabaseError::from)?),
            )
            .await?;
        }
        let source = find_source_in(&tx, id).await?.ok_or(DatabaseError::NoResult)?;
        tx.commit().await?;
        Ok(source)
    }

    /// Delete a source that no source record refers to.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no source has this id, and
    /// `CoreError::Validation` while source records still point at it.
    pub async fn delete_source(&self, id: i64) -> Result<(), ServiceError> {
        let tx = self.db().begin_write().await?;
        if find_source_in(&tx, id).await?.is_none() {
            return Err(CoreError::not_found(EntityType::Source, id.to_string()).into());
        }

        let mut rows = tx
            .query(
                "SELECT COUNT(*) FROM species_sources WHERE source_id = ?1",
                [id],
            )
            .await?;
        let in_use = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;
        if in_use > 0 {
            return Err(CoreError::Validation(format!(
                "source {id} is still used by {in_use} source record(s)"
            ))
            .into());
        }

        tx.execute("DELETE FROM sources WHERE id = ?1", [id]).await?;
        audit::record(
            &tx,
            EntityType::Source,
            &id.to_string(),
            AuditAction::Deleted,
            None,
        )
        .await?;
        tx.commit().await?;
        info!(id, "source deleted");
        Ok(())
    }
}
