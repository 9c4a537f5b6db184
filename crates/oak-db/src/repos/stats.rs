//! Store-wide row counts.

use oak_core::responses::Stats;

use crate::error::DatabaseError;
use crate::service::OakService;

impl OakService {
    /// Species, hybrid, taxon, and source counts.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn stats(&self) -> Result<Stats, DatabaseError> {
        let conn = self.db().read().await;
        let mut rows = conn
            .query(
                "SELECT
                     (SELECT COUNT(*) FROM oak_entries WHERE is_hybrid = 0),
                     (SELECT COUNT(*) FROM oak_entries WHERE is_hybrid = 1),
                     (SELECT COUNT(*) FROM taxa),
                     (SELECT COUNT(*) FROM sources)",
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = |idx: i32| -> Result<u64, DatabaseError> {
            u64::try_from(row.get::<i64>(idx)?)
                .map_err(|e| DatabaseError::InvalidState(format!("negative count: {e}")))
        };
        Ok(Stats {
            species_count: count(0)?,
            hybrid_count: count(1)?,
            taxa_count: count(2)?,
            source_count: count(3)?,
        })
    }
}
