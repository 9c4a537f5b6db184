//! Prefixes for generated identifiers.
//!
//! Entries are keyed by scientific name and sources by integer id, so the
//! audit trail is the only table with generated text ids.

/// Prefix for audit trail ids, e.g. `aud-3fa1b2c4`.
pub const PREFIX_AUDIT: &str = "aud";
