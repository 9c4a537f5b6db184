//! Entry validation.
//!
//! Validators are passed explicitly into service calls. They never touch the
//! database; taxa are loaded into a [`Vocabulary`] beforehand.

use oak_core::entities::Entry;
use oak_core::enums::TaxonLevel;

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;
use crate::vocabulary::Vocabulary;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;

/// Checks an entry before it is written.
pub trait EntryValidator: Send + Sync {
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` listing every problem found.
    fn validate(&self, entry: &Entry) -> Result<(), SchemaError>;
}

/// Accepts every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl EntryValidator for AcceptAll {
    fn validate(&self, _entry: &Entry) -> Result<(), SchemaError> {
        Ok(())
    }
}

/// Structural, vocabulary, and parent-reference checks.
pub struct SchemaValidator {
    registry: SchemaRegistry,
    vocabulary: Vocabulary,
}

impl SchemaValidator {
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            registry: SchemaRegistry::new(),
            vocabulary,
        }
    }

    #[must_use]
    pub const fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn check_vocabulary(&self, entry: &Entry, errors: &mut Vec<String>) {
        if let Some(subgenus) = entry
            .subgenus
            .as_deref()
            .filter(|s| !self.vocabulary.subgenera.contains(*s))
        {
            errors.push(format!("unknown subgenus '{subgenus}'"));
        }
        if let Some(status) = entry
            .conservation_status
            .as_deref()
            .filter(|s| !self.vocabulary.conservation_statuses.contains(*s))
        {
            errors.push(format!("unknown conservation status '{status}'"));
        }
        for (level, value) in [
            (TaxonLevel::Section, entry.section.as_deref()),
            (TaxonLevel::Subsection, entry.subsection.as_deref()),
            (TaxonLevel::Complex, entry.complex.as_deref()),
        ] {
            if let Some(value) = value.filter(|v| !self.vocabulary.knows_taxon(level, v)) {
                errors.push(format!("unknown {level} '{value}'"));
            }
        }
    }
}

fn check_name(entry: &Entry, errors: &mut Vec<String>) {
    let len = entry.name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        errors.push(format!(
            "scientific_name must be {NAME_MIN_CHARS}-{NAME_MAX_CHARS} characters, got {len}"
        ));
    }
}

fn check_parents(entry: &Entry, errors: &mut Vec<String>) {
    if !entry.is_hybrid && !entry.parent_set().is_empty() {
        errors.push("parent1/parent2 are only allowed on hybrids".to_string());
    }
    if entry.has_parent(&entry.name) {
        errors.push(format!("'{}' cannot be its own parent", entry.name));
    }
}

impl EntryValidator for SchemaValidator {
    fn validate(&self, entry: &Entry) -> Result<(), SchemaError> {
        let instance =
            serde_json::to_value(entry).map_err(|e| SchemaError::Generation(e.to_string()))?;
        let mut errors = self.registry.errors("entry", &instance)?;

        check_name(entry, &mut errors);
        self.check_vocabulary(entry, &mut errors);
        check_parents(entry, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }
}
