use anyhow::Context;
use oak_config::OakConfig;

use crate::cli::GlobalFlags;

/// Handle `oak config`.
///
/// `--db` is reflected in `database.path` so the output shows the store that
/// would actually be opened.
pub fn handle(config: &OakConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut effective = config.clone();
    if let Some(db) = &flags.db {
        effective.database.path.clone_from(db);
    }

    print!("{}", to_toml(&effective)?);
    Ok(())
}

fn to_toml(config: &OakConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to render configuration as TOML")
}
