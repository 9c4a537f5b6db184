//! Taxa repository: the reference vocabulary for taxonomic placement.

use oak_core::entities::Taxon;
use oak_core::enums::{AuditAction, EntityType, TaxonLevel};
use oak_core::errors::CoreError;

use crate::error::{DatabaseError, ServiceError};
use crate::helpers::{get_opt_string, parse_enum};
use crate::repos::audit;
use crate::service::OakService;

fn row_to_taxon(row: &libsql::Row) -> Result<Taxon, DatabaseError> {
    Ok(Taxon {
        name: row.get::<String>(0)?,
        level: parse_enum(&row.get::<String>(1)?)?,
        parent: get_opt_string(row, 2)?,
        author: get_opt_string(row, 3)?,
        notes: get_opt_string(row, 4)?,
    })
}

impl OakService {
    /// Insert or replace a taxon keyed by `(name, level)`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name.
    pub async fn save_taxon(&self, taxon: Taxon) -> Result<Taxon, ServiceError> {
        if taxon.name.trim().is_empty() {
            return Err(CoreError::Validation("taxon name must not be empty".into()).into());
        }

        let tx = self.db().begin_write().await?;
        tx.execute(
            "INSERT INTO taxa (name, level, parent, author, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(name, level) DO UPDATE SET
                 parent = excluded.parent,
                 author = excluded.author,
                 notes = excluded.notes",
            libsql::params![
                taxon.name.as_str(),
                taxon.level.as_str(),
                taxon.parent.as_deref(),
                taxon.author.as_deref(),
                taxon.notes.as_deref()
            ],
        )
        .await?;
        audit::record(
            &tx,
            EntityType::Taxon,
            &format!("{}/{}", taxon.level, taxon.name),
            AuditAction::Created,
            None,
        )
        .await?;
        tx.commit().await?;
        Ok(taxon)
    }

    /// Taxa ordered by level then name, optionally restricted to one level.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_taxa(&self, level: Option<TaxonLevel>) -> Result<Vec<Taxon>, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = match level {
            Some(level) => {
                conn.query(
                    "SELECT name, level, parent, author, notes FROM taxa
                     WHERE level = ?1 ORDER BY name",
                    [level.as_str()],
                )
                .await?
            }
            None => {
                conn.query(
                    "SELECT name, level, parent, author, notes FROM taxa ORDER BY level, name",
                    (),
                )
                .await?
            }
        };
        let mut taxa = Vec::new();
        while let Some(row) = rows.next().await? {
            taxa.push(row_to_taxon(&row)?);
        }
        Ok(taxa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_service;

    fn taxon(name: &str, level: TaxonLevel) -> Taxon {
        Taxon {
            name: name.into(),
            level,
            parent: None,
            author: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn save_and_list_by_level() {
        let svc = test_service().await;
        svc.save_taxon(taxon("Quercus", TaxonLevel::Subgenus))
            .await
            .unwrap();
        svc.save_taxon(taxon("Lobatae", TaxonLevel::Section))
            .await
            .unwrap();
        svc.save_taxon(taxon("Albae", TaxonLevel::Section))
            .await
            .unwrap();

        let sections = svc.list_taxa(Some(TaxonLevel::Section)).await.unwrap();
        let names: Vec<_> = sections.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Albae", "Lobatae"]);
        assert_eq!(svc.list_taxa(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn same_name_at_two_levels_is_two_rows() {
        let svc = test_service().await;
        svc.save_taxon(taxon("Quercus", TaxonLevel::Subgenus))
            .await
            .unwrap();
        svc.save_taxon(taxon("Quercus", TaxonLevel::Section))
            .await
            .unwrap();
        svc.save_taxon(taxon("Quercus", TaxonLevel::Section))
            .await
            .unwrap();
        assert_eq!(svc.list_taxa(None).await.unwrap().len(), 2);
    }
}
