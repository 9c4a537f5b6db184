use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A link to an external resource describing an entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExternalLink {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A taxonomic record (species or hybrid), keyed by its scientific name.
///
/// `hybrids` is derived: it lists every entry naming this one as `parent1` or
/// `parent2`. It is written only by the relationship engine in `oak-db`; any
/// value supplied by a caller is discarded on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Entry {
    #[serde(rename = "scientific_name", alias = "name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default)]
    pub is_hybrid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgenus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent2: Option<String>,
    #[serde(default)]
    pub hybrids: Vec<String>,
    #[serde(default)]
    pub closely_related_to: Vec<String>,
    #[serde(default)]
    pub subspecies_varieties: Vec<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,
}

impl Entry {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Non-empty parent references, as a set.
    #[must_use]
    pub fn parent_set(&self) -> BTreeSet<String> {
        [&self.parent1, &self.parent2]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect()
    }

    /// Whether `name` is referenced as `parent1` or `parent2`.
    #[must_use]
    pub fn has_parent(&self, name: &str) -> bool {
        self.parent1.as_deref() == Some(name) || self.parent2.as_deref() == Some(name)
    }

    /// Trim every string, turn empty scalars into `None`, and drop empty or
    /// repeated list values while keeping first-seen order.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        for slot in [
            &mut self.author,
            &mut self.conservation_status,
            &mut self.subgenus,
            &mut self.section,
            &mut self.subsection,
            &mut self.complex,
            &mut self.parent1,
            &mut self.parent2,
        ] {
            *slot = slot
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        for list in [
            &mut self.hybrids,
            &mut self.closely_related_to,
            &mut self.subspecies_varieties,
            &mut self.synonyms,
        ] {
            let values = std::mem::take(list);
            for value in values {
                let value = value.trim().to_string();
                if !value.is_empty() && !list.contains(&value) {
                    list.push(value);
                }
            }
        }
        let links = std::mem::take(&mut self.external_links);
        for link in links {
            if !self.external_links.contains(&link) {
                self.external_links.push(link);
            }
        }
        self
    }
}

/// AND of optional equality predicates used by list and count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subgenus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hybrid: Option<bool>,
}
