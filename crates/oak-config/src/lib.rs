//! # oak-config
//!
//! Layered configuration loading for oak using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OAK_*` prefix, `__` as separator)
//! 2. Project-level `.oak/config.toml`
//! 3. User-level `~/.config/oak/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OAK_DATABASE__PATH` -> `database.path`,
//! `OAK_IMPORT__DEFAULT_POLICY` -> `import.default_policy`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use oak_config::OakConfig;
//!
//! let config = OakConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod import;
mod vocabulary;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use import::ImportConfig;
pub use vocabulary::VocabularyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OakConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub import: ImportConfig,
}

impl OakConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed, or
    /// `ConfigError::InvalidValue` when the merged values are inconsistent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and check a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".oak/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("OAK_").split("__"))
    }

    /// Cross-field checks that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.max_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.max_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.default_limit == 0 || self.general.default_limit > self.general.max_limit
        {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: format!("must be between 1 and {}", self.general.max_limit),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("oak").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oak_core::enums::ConflictStrategy;

    #[test]
    fn default_config_is_valid() {
        let config = OakConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.path, ".oak/oak.db");
        assert_eq!(config.import.default_policy, ConflictStrategy::PreferExisting);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: OakConfig = OakConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.general.default_limit, 50);
        assert_eq!(config.general.max_limit, 500);
    }

    #[test]
    fn default_limit_above_max_is_rejected() {
        let mut config = OakConfig::default();
        config.general.default_limit = 600;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"));
    }
}
