use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Source-attributed descriptive data for one entry.
///
/// At most one record per `(scientific_name, source_id)`, and at most one
/// preferred record per entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SourceRecord {
    #[serde(default)]
    pub id: i64,
    pub scientific_name: String,
    pub source_id: i64,
    #[serde(default)]
    pub local_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_habit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaves: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flowers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fruits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twigs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hardiness_habitat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub miscellaneous: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub is_preferred: bool,
}
