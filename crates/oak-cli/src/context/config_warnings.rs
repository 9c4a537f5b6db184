/// Warn about `OAK_*` variables that figment cannot map onto a config key.
pub fn warn_unconfigured<I>(env: I)
where
    I: IntoIterator<Item = (String, String)>,
{
    for warning in collect_unconfigured_warnings(env) {
        tracing::warn!("{warning}");
    }
}

/// Keys read directly rather than through figment.
const DIRECT_KEYS: [&str; 1] = ["OAK_LOG"];

fn collect_unconfigured_warnings<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = env
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key.starts_with("OAK_") && !DIRECT_KEYS.contains(&key.as_str()))
        .filter(|key| !key["OAK_".len()..].contains("__"))
        .map(|key| {
            format!(
                "{key} is ignored: nested keys need a double underscore (example: OAK_DATABASE__PATH)."
            )
        })
        .collect::<Vec<_>>();
    warnings.sort();
    warnings
}
