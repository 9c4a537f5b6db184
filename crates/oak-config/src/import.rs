//! Bulk import defaults.

use oak_core::enums::ConflictStrategy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Conflict policy used when `oak import` is run without `--policy`.
    #[serde(default)]
    pub default_policy: ConflictStrategy,
}
