//! Source update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<Option<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
}

pub struct SourceUpdateBuilder(SourceUpdate);

impl SourceUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(SourceUpdate::default())
    }

    #[must_use]
    pub fn source_type(mut self, val: impl Into<String>) -> Self {
        self.0.source_type = Some(val.into());
        self
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn author(mut self, val: Option<String>) -> Self {
        self.0.author = Some(val);
        self
    }

    #[must_use]
    pub const fn year(mut self, val: Option<i32>) -> Self {
        self.0.year = Some(val);
        self
    }

    #[must_use]
    pub fn url(mut self, val: Option<String>) -> Self {
        self.0.url = Some(val);
        self
    }

    #[must_use]
    pub fn license(mut self, val: Option<String>) -> Self {
        self.0.license = Some(val);
        self
    }

    #[must_use]
    pub fn notes(mut self, val: Option<String>) -> Self {
        self.0.notes = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> SourceUpdate {
        self.0
    }
}

impl Default for SourceUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
