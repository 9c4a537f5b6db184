use std::path::Path;

use anyhow::Context;
use oak_config::{DatabaseConfig, OakConfig};
use oak_db::service::OakService;
use oak_schema::{SchemaValidator, Vocabulary};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: OakService,
    pub config: OakConfig,
    pub validator: SchemaValidator,
}

impl AppContext {
    /// Open the store and build the validator from config plus the stored taxa.
    ///
    /// `db_override` (from `--db`) wins over `database.path`.
    pub async fn init(config: OakConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let mut database = config.database.clone();
        if let Some(path) = db_override {
            database.path = path.to_string();
        }
        ensure_parent_dir(&database)?;
        let db_path = database.path;

        let service = OakService::new_local(&db_path, config.general.clone())
            .await
            .with_context(|| format!("failed to open oak database at {db_path}"))?;

        let taxa = service
            .list_taxa(None)
            .await
            .context("failed to load taxa for validation")?;
        let vocabulary = Vocabulary::new(
            config.vocabulary.subgenera.iter().cloned(),
            config.vocabulary.conservation_statuses.iter().cloned(),
        )
        .with_taxa(&taxa);
        tracing::debug!(
            db = %db_path,
            taxa = taxa.len(),
            checks_taxa = vocabulary.has_taxa(),
            "application context ready"
        );

        Ok(Self {
            service,
            config,
            validator: SchemaValidator::new(vocabulary),
        })
    }
}

fn ensure_parent_dir(database: &DatabaseConfig) -> anyhow::Result<()> {
    if database.is_in_memory() {
        return Ok(());
    }
    match Path::new(&database.path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use oak_config::OakConfig;
    use oak_core::entities::Entry;
    use tempfile::TempDir;

    use super::AppContext;

    #[tokio::test]
    async fn creates_missing_database_directory() {
        let dir = TempDir::new().expect("tempdir");
        let db = dir.path().join("nested").join("oak.db");

        let ctx = AppContext::init(OakConfig::default(), Some(&db.to_string_lossy()))
            .await
            .expect("context should open");
        assert!(db.parent().is_some_and(std::path::Path::is_dir));
        assert_eq!(ctx.service.stats().await.expect("stats").species_count, 0);
    }

    #[tokio::test]
    async fn memory_store_touches_no_directory() {
        let dir = TempDir::new().expect("tempdir");
        let mut config = OakConfig::default();
        config.database.path = dir.path().join("unused").join("oak.db").to_string_lossy().into();

        AppContext::init(config, Some(":memory:"))
            .await
            .expect("context should open");
        assert!(!dir.path().join("unused").exists());
    }

    #[tokio::test]
    async fn validator_uses_configured_vocabulary() {
        let mut config = OakConfig::default();
        config.vocabulary.subgenera = vec!["Lobatae".into()];
        let ctx = AppContext::init(config, Some(":memory:"))
            .await
            .expect("context should open");

        let mut quercus = Entry::new("alba");
        quercus.subgenus = Some("Quercus".into());
        assert!(ctx.service.create_entry(quercus, &ctx.validator).await.is_err());

        let mut lobatae = Entry::new("rubra");
        lobatae.subgenus = Some("Lobatae".into());
        assert!(ctx.service.create_entry(lobatae, &ctx.validator).await.is_ok());
    }
}
