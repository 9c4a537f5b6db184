//! Whole-store export: the denormalized file the browser app loads.
//!
//! Taxonomy is nested per species and each species carries its source records
//! with the owning source's name and license attached.

use std::collections::HashMap;

use chrono::{DateTime, SubsecRound, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Entry, ExternalLink, Source, SourceRecord};

/// Genus every exported species belongs to.
pub const GENUS: &str = "Quercus";

/// A complete dump of the store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportFile {
    pub metadata: ExportMetadata,
    pub sources: Vec<Source>,
    pub species: Vec<ExportSpecies>,
}

/// Version info for cache invalidation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportMetadata {
    /// Export time as `YYYY-MM-DDTHH:MM:SSZ`.
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub species_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Taxonomy {
    pub genus: String,
    pub subgenus: Option<String>,
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex: Option<String>,
}

/// One entry in export form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportSpecies {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub is_hybrid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<String>,
    pub taxonomy: Taxonomy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent2: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hybrids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub closely_related_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subspecies_varieties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_links: Vec<ExternalLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<ExportSourceData>,
}

/// A source record with its source's attribution inlined.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExportSourceData {
    pub source_id: i64,
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    pub is_preferred: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
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
    /// The source's own page for this species.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ExportSourceData {
    fn new(record: SourceRecord, source: Option<&Source>) -> Self {
        Self {
            source_id: record.source_id,
            source_name: source
                .map_or_else(|| format!("Source {}", record.source_id), |s| s.name.clone()),
            source_url: source.and_then(|s| s.url.clone()),
            license: source.and_then(|s| s.license.clone()),
            license_url: source.and_then(|s| s.license_url.clone()),
            is_preferred: record.is_preferred,
            local_names: record.local_names,
            range: record.range,
            growth_habit: record.growth_habit,
            leaves: record.leaves,
            flowers: record.flowers,
            fruits: record.fruits,
            bark: record.bark,
            twigs: record.twigs,
            buds: record.buds,
            hardiness_habitat: record.hardiness_habitat,
            miscellaneous: record.miscellaneous,
            url: record.url,
        }
    }
}

impl ExportSpecies {
    fn new(entry: Entry, sources: Vec<ExportSourceData>) -> Self {
        Self {
            name: entry.name,
            author: entry.author,
            is_hybrid: entry.is_hybrid,
            conservation_status: entry.conservation_status,
            taxonomy: Taxonomy {
                genus: GENUS.to_string(),
                subgenus: entry.subgenus,
                section: entry.section,
                subsection: entry.subsection,
                complex: entry.complex,
            },
            parent1: entry.parent1,
            parent2: entry.parent2,
            hybrids: entry.hybrids,
            closely_related_to: entry.closely_related_to,
            subspecies_varieties: entry.subspecies_varieties,
            synonyms: entry.synonyms,
            external_links: entry.external_links,
            sources,
        }
    }
}

impl ExportFile {
    /// Assemble an export from stored rows.
    ///
    /// `records` may be in any entry order; each entry keeps its records in
    /// the order given. Records of entries not in `entries` are dropped.
    #[must_use]
    pub fn build(
        entries: Vec<Entry>,
        sources: Vec<Source>,
        records: Vec<SourceRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        let now = now.trunc_subsecs(0);
        let mut grouped: HashMap<String, Vec<ExportSourceData>> = HashMap::new();
        {
            let by_id: HashMap<i64, &Source> = sources.iter().map(|s| (s.id, s)).collect();
            for record in records {
                let source = by_id.get(&record.source_id).copied();
                grouped
                    .entry(record.scientific_name.clone())
                    .or_default()
                    .push(ExportSourceData::new(record, source));
            }
        }

        let species: Vec<ExportSpecies> = entries
            .into_iter()
            .map(|entry| {
                let records = grouped.remove(&entry.name).unwrap_or_default();
                ExportSpecies::new(entry, records)
            })
            .collect();

        Self {
            metadata: ExportMetadata {
                version: now.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                exported_at: now,
                species_count: species.len() as u64,
            },
            sources,
            species,
        }
    }
}
