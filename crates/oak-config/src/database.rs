//! Database location.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".oak/oak.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL database file. `:memory:` opens a throwaway store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_memory_marker_is_in_memory() {
        assert!(!DatabaseConfig::default().is_in_memory());
        let memory = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert!(memory.is_in_memory());
    }
}
