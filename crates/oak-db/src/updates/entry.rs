//! Entry update builder.
//!
//! There is no `hybrids` field: that list is derived by the consistency engine.

use oak_core::entities::{Entry, ExternalLink};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct EntryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hybrid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conservation_status: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subgenus: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subsection: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complex: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent1: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent2: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closely_related_to: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subspecies_varieties: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_links: Option<Vec<ExternalLink>>,
}

impl EntryUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.is_hybrid.is_none()
            && self.conservation_status.is_none()
            && self.subgenus.is_none()
            && self.section.is_none()
            && self.subsection.is_none()
            && self.complex.is_none()
            && self.parent1.is_none()
            && self.parent2.is_none()
            && self.closely_related_to.is_none()
            && self.subspecies_varieties.is_none()
            && self.synonyms.is_none()
            && self.external_links.is_none()
    }

    /// Overwrite the fields of `entry` that this update sets.
    pub fn apply_to(&self, entry: &mut Entry) {
        fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
            if let Some(value) = value {
                slot.clone_from(value);
            }
        }

        set(&mut entry.author, self.author.as_ref());
        set(&mut entry.is_hybrid, self.is_hybrid.as_ref());
        set(
            &mut entry.conservation_status,
            self.conservation_status.as_ref(),
        );
        set(&mut entry.subgenus, self.subgenus.as_ref());
        set(&mut entry.section, self.section.as_ref());
        set(&mut entry.subsection, self.subsection.as_ref());
        set(&mut entry.complex, self.complex.as_ref());
        set(&mut entry.parent1, self.parent1.as_ref());
        set(&mut entry.parent2, self.parent2.as_ref());
        set(
            &mut entry.closely_related_to,
            self.closely_related_to.as_ref(),
        );
        set(
            &mut entry.subspecies_varieties,
            self.subspecies_varieties.as_ref(),
        );
        set(&mut entry.synonyms, self.synonyms.as_ref());
        set(&mut entry.external_links, self.external_links.as_ref());
    }
}

pub struct EntryUpdateBuilder(EntryUpdate);

impl EntryUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(EntryUpdate::default())
    }

    #[must_use]
    pub fn author(mut self, val: Option<String>) -> Self {
        self.0.author = Some(val);
        self
    }

    #[must_use]
    pub const fn is_hybrid(mut self, val: bool) -> Self {
        self.0.is_hybrid = Some(val);
        self
    }

    #[must_use]
    pub fn conservation_status(mut self, val: Option<String>) -> Self {
        self.0.conservation_status = Some(val);
        self
    }

    #[must_use]
    pub fn subgenus(mut self, val: Option<String>) -> Self {
        self.0.subgenus = Some(val);
        self
    }

    #[must_use]
    pub fn section(mut self, val: Option<String>) -> Self {
        self.0.section = Some(val);
        self
    }

    #[must_use]
    pub fn subsection(mut self, val: Option<String>) -> Self {
        self.0.subsection = Some(val);
        self
    }

    #[must_use]
    pub fn complex(mut self, val: Option<String>) -> Self {
        self.0.complex = Some(val);
        self
    }

    #[must_use]
    pub fn parent1(mut self, val: Option<String>) -> Self {
        self.0.parent1 = Some(val);
        self
    }

    #[must_use]
    pub fn parent2(mut self, val: Option<String>) -> Self {
        self.0.parent2 = Some(val);
        self
    }

    #[must_use]
    pub fn closely_related_to(mut self, val: Vec<String>) -> Self {
        self.0.closely_related_to = Some(val);
        self
    }

    #[must_use]
    pub fn subspecies_varieties(mut self, val: Vec<String>) -> Self {
        self.0.subspecies_varieties = Some(val);
        self
    }

    #[must_use]
    pub fn synonyms(mut self, val: Vec<String>) -> Self {
        self.0.synonyms = Some(val);
        self
    }

    #[must_use]
    pub fn external_links(mut self, val: Vec<ExternalLink>) -> Self {
        self.0.external_links = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> EntryUpdate {
        self.0
    }
}

impl Default for EntryUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_is_empty() {
        assert!(EntryUpdateBuilder::new().build().is_empty());
    }

    #[test]
    fn clearing_a_field_is_not_empty() {
        let update = EntryUpdateBuilder::new().parent2(None).build();
        assert!(!update.is_empty());

        let mut e = Entry::new("× bebbiana");
        e.parent2 = Some("macrocarpa".into());
        update.apply_to(&mut e);
        assert_eq!(e.parent2, None);
    }

    #[test]
    fn serializes_changed_fields_only() {
        let update = EntryUpdateBuilder::new()
            .author(Some("Michx.".into()))
            .parent1(None)
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"author": "Michx.", "parent1": null})
        );
    }
}
