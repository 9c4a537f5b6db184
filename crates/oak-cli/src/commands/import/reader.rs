use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use oak_core::entities::Entry;
use serde::Deserialize;

/// Either one entry or a list of them in a `.json` file.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Many(Vec<Entry>),
    One(Box<Entry>),
}

/// Read import records from `path`.
///
/// `.jsonl` and `.ndjson` files hold one entry per line. Anything else is
/// parsed as a JSON array of entries or a single entry object.
pub fn read_records(path: &Path) -> anyhow::Result<Vec<Entry>> {
    if is_json_lines(path) {
        return serde_jsonlines::json_lines::<Entry, _>(path)
            .with_context(|| format!("failed to open {}", path.display()))?
            .enumerate()
            .map(|(idx, line)| {
                line.with_context(|| format!("{}: invalid entry on line {}", path.display(), idx + 1))
            })
            .collect();
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let payload: JsonPayload = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{}: expected an entry or a list of entries", path.display()))?;
    Ok(match payload {
        JsonPayload::Many(entries) => entries,
        JsonPayload::One(entry) => vec![*entry],
    })
}

fn is_json_lines(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jsonl") || ext.eq_ignore_ascii_case("ndjson"))
}
