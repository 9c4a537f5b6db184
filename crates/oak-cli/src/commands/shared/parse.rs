use oak_core::names::normalize_hybrid_name;
use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.replace('-', "_");
    let json = format!("\"{normalized}\"");
    serde_json::from_str(&json).map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// A name as typed on the command line, with `x` hybrid markers turned into `×`.
#[must_use]
pub fn entry_name(raw: &str) -> String {
    normalize_hybrid_name(raw)
}

/// Map a `--field` value onto a nullable update: absent leaves the field
/// alone, an empty string clears it.
#[must_use]
pub fn nullable(raw: Option<&str>) -> Option<Option<String>> {
    raw.map(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Like [`nullable`], for fields holding entry names.
#[must_use]
pub fn nullable_name(raw: Option<&str>) -> Option<Option<String>> {
    nullable(raw).map(|value| value.map(|name| entry_name(&name)))
}
