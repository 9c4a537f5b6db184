//! Schema registry for the oak-core types.
//!
//! The `SchemaRegistry` builds JSON Schemas at construction time using
//! [`schemars::schema_for!`] and validates values with `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas for the types that cross the process boundary.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or(serde_json::Value::Bool(true)),
        );
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        register!(schemas, "entry", oak_core::entities::Entry);
        register!(schemas, "source", oak_core::entities::Source);
        register!(schemas, "source_record", oak_core::entities::SourceRecord);
        register!(schemas, "taxon", oak_core::entities::Taxon);
        register!(schemas, "audit_entry", oak_core::entities::AuditEntry);
        register!(schemas, "import_summary", oak_core::import::ImportSummary);
        register!(schemas, "export_file", oak_core::export::ExportFile);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let errors = self.errors(name, instance)?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate and return every error message instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` for an unknown schema name and
    /// `SchemaError::Generation` if the schema does not compile.
    pub fn errors(
        &self,
        name: &str,
        instance: &serde_json::Value,
    ) -> Result<Vec<String>, SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        Ok(validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect())
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
