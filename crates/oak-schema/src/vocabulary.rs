//! Accepted values for controlled entry fields.

use std::collections::{BTreeSet, HashMap};

use oak_core::entities::Taxon;
use oak_core::enums::TaxonLevel;

/// Subgenera recognized when no configuration overrides them.
pub const DEFAULT_SUBGENERA: [&str; 3] = ["Quercus", "Cerris", "Cyclobalanopsis"];

/// IUCN Red List categories.
pub const IUCN_CODES: [&str; 9] = ["EX", "EW", "CR", "EN", "VU", "NT", "LC", "DD", "NE"];

/// Controlled vocabulary used by [`crate::SchemaValidator`].
///
/// `taxa` is `None` until a non-empty taxon list is loaded; placement fields
/// are only checked against it once it is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    pub subgenera: BTreeSet<String>,
    pub conservation_statuses: BTreeSet<String>,
    taxa: Option<HashMap<TaxonLevel, BTreeSet<String>>>,
}

impl Vocabulary {
    pub fn new<S, C>(subgenera: S, conservation_statuses: C) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            subgenera: subgenera.into_iter().map(Into::into).collect(),
            conservation_statuses: conservation_statuses.into_iter().map(Into::into).collect(),
            taxa: None,
        }
    }

    /// Attach the taxa reference table. An empty list leaves taxa unloaded.
    #[must_use]
    pub fn with_taxa<'a>(mut self, taxa: impl IntoIterator<Item = &'a Taxon>) -> Self {
        let mut by_level: HashMap<TaxonLevel, BTreeSet<String>> = HashMap::new();
        for taxon in taxa {
            by_level
                .entry(taxon.level)
                .or_default()
                .insert(taxon.name.clone());
        }
        self.taxa = (!by_level.is_empty()).then_some(by_level);
        self
    }

    #[must_use]
    pub const fn has_taxa(&self) -> bool {
        self.taxa.is_some()
    }

    /// Whether `name` is a known taxon at `level`. Always true while no taxa
    /// are loaded.
    #[must_use]
    pub fn knows_taxon(&self, level: TaxonLevel, name: &str) -> bool {
        self.taxa.as_ref().is_none_or(|taxa| {
            taxa.get(&level)
                .is_some_and(|names| names.contains(name))
        })
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SUBGENERA, IUCN_CODES)
    }
}
