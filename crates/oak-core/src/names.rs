//! Hybrid name normalization.

/// Rewrite an ASCII hybrid marker to the multiplication sign.
///
/// A leading `"x "` becomes `"× "` and an internal `" x "` becomes `" × "`,
/// so `"x bebbiana"` and `"Quercus x bebbiana"` match their stored forms.
#[must_use]
pub fn normalize_hybrid_name(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix("x ")
        .map_or_else(|| name.to_string(), |rest| format!("× {rest}"));
    name.replace(" x ", " × ")
}
