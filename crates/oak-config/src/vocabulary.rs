//! Controlled vocabulary for validation.

use serde::{Deserialize, Serialize};

fn default_subgenera() -> Vec<String> {
    ["Quercus", "Cerris", "Cyclobalanopsis"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_conservation_statuses() -> Vec<String> {
    ["EX", "EW", "CR", "EN", "VU", "NT", "LC", "DD", "NE"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabularyConfig {
    #[serde(default = "default_subgenera")]
    pub subgenera: Vec<String>,

    /// IUCN Red List codes accepted for `conservation_status`.
    #[serde(default = "default_conservation_statuses")]
    pub conservation_statuses: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            subgenera: default_subgenera(),
            conservation_statuses: default_conservation_statuses(),
        }
    }
}
