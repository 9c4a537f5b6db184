use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::TaxonLevel;

/// A reference vocabulary row for taxonomic placement.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Taxon {
    pub name: String,
    pub level: TaxonLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
