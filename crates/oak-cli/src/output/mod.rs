use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items)),
        Value::Object(map) => {
            let headers = ["field", "value"];
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, table_options()))
        }
    }
}

fn render_array_table(items: &[Value]) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, table_options());
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    headers.sort_by_key(|key| (!IDENTITY_COLUMNS.contains(&key.as_str()), key.clone()));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, table_options())
}

/// Keys that identify a row; they lead the table.
const IDENTITY_COLUMNS: [&str; 4] = ["id", "scientific_name", "name", "source_id"];

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use oak_core::entities::Entry;
    use pretty_assertions::assert_eq;

    use super::render;
    use crate::cli::OutputFormat;

    fn bebbiana() -> Entry {
        Entry {
            is_hybrid: true,
            parent1: Some("alba".into()),
            parent2: Some("macrocarpa".into()),
            ..Entry::new("× bebbiana")
        }
    }

    #[test]
    fn json_render_uses_stored_field_names() {
        let out = render(&bebbiana(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["scientific_name"], "× bebbiana");
        assert_eq!(parsed["parent2"], "macrocarpa");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&bebbiana(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn entry_list_table_starts_with_name_column() {
        let out = render(&vec![Entry::new("alba"), bebbiana()], OutputFormat::Table)
            .expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.starts_with("scientific_name"));
        assert!(out.contains("× bebbiana"));
    }

    #[test]
    fn string_lists_render_comma_separated() {
        let mut alba = Entry::new("alba");
        alba.synonyms = vec!["Quercus alba var. repanda".into(), "Q. ramosa".into()];
        let out = render(&alba, OutputFormat::Table).expect("table render should work");
        assert!(out.contains("Quercus alba var. repanda, Q. ramosa"));
    }

    #[test]
    fn empty_list_has_placeholder() {
        let out = render(&Vec::<Entry>::new(), OutputFormat::Table).expect("render");
        assert_eq!(out, "(no rows)");
    }
}
