//! Whole-store export for the browser app.

use chrono::Utc;
use oak_core::export::ExportFile;
use tracing::info;

use crate::error::DatabaseError;
use crate::repos::entry::all_entries_in;
use crate::repos::source::all_sources_in;
use crate::repos::species_source::all_records_in;
use crate::service::OakService;

impl OakService {
    /// Every entry, source, and source record as one [`ExportFile`].
    ///
    /// All three reads share one connection hold, so no write lands between
    /// them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn export(&self) -> Result<ExportFile, DatabaseError> {
        let (entries, sources, records) = {
            let conn = self.db().read().await;
            (
                all_entries_in(&conn).await?,
                all_sources_in(&conn).await?,
                all_records_in(&conn).await?,
            )
        };

        let file = ExportFile::build(entries, sources, records, Utc::now());
        info!(
            species = file.metadata.species_count,
            sources = file.sources.len(),
            version = %file.metadata.version,
            "export built"
        );
        Ok(file)
    }
}
