//! Response shapes returned by the service and printed by `oak` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Entry, SourceRecord};

/// One page of a listing, with the total matching count.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Row counts across the store.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Stats {
    pub species_count: u64,
    pub hybrid_count: u64,
    pub taxa_count: u64,
    pub source_count: u64,
}

/// An entry together with its source records, preferred first.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EntryWithSources {
    #[serde(flatten)]
    pub entry: Entry,
    pub sources: Vec<SourceRecord>,
}
