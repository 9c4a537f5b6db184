//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    50
}

/// Hard cap applied to any requested limit.
const fn max_limit() -> u32 {
    500
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Requested limits above this are clamped.
    #[serde(default = "max_limit")]
    pub max_limit: u32,
}

impl GeneralConfig {
    /// Resolve a requested limit: `None` or zero means the default, and
    /// anything above `max_limit` is clamped.
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => self.default_limit,
            Some(n) => n.min(self.max_limit),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: max_limit(),
        }
    }
}
