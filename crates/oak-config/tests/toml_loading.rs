//! Integration tests for TOML and environment configuration loading.
//!
//! Uses figment::Jail for sandboxed files and env vars.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use oak_config::{ConfigError, OakConfig};
use oak_core::enums::ConflictStrategy;
use pretty_assertions::assert_eq;

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/oak/oak.db"

[general]
default_limit = 25
max_limit = 100

[vocabulary]
subgenera = ["Quercus", "Cerris"]

[import]
default_policy = "skip"
"#,
        )?;

        let config: OakConfig = Figment::from(Serialized::defaults(OakConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/oak/oak.db");
        assert_eq!(config.general.default_limit, 25);
        assert_eq!(config.general.max_limit, 100);
        assert_eq!(config.vocabulary.subgenera, vec!["Quercus", "Cerris"]);
        assert_eq!(config.vocabulary.conservation_statuses.len(), 9);
        assert_eq!(config.import.default_policy, ConflictStrategy::Skip);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".oak")?;
        jail.create_file(
            ".oak/config.toml",
            r#"
[database]
path = "local.db"
"#,
        )?;

        let config = OakConfig::load().expect("config loads");
        assert_eq!(config.database.path, "local.db");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_limit = 25
"#,
        )?;
        jail.set_env("OAK_GENERAL__DEFAULT_LIMIT", "75");
        jail.set_env("OAK_IMPORT__DEFAULT_POLICY", "prefer_imported");

        let config: OakConfig = Figment::from(Serialized::defaults(OakConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("OAK_").split("__"))
            .extract()?;

        assert_eq!(config.general.default_limit, 75);
        assert_eq!(config.import.default_policy, ConflictStrategy::PreferImported);
        Ok(())
    });
}

#[test]
fn inconsistent_limits_fail_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("OAK_GENERAL__DEFAULT_LIMIT", "900");

        let result = OakConfig::load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
        Ok(())
    });
}

#[test]
fn unknown_policy_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("OAK_IMPORT__DEFAULT_POLICY", "coin_flip");

        let result = OakConfig::load();
        assert!(matches!(result, Err(ConfigError::Figment(_))));
        Ok(())
    });
}
