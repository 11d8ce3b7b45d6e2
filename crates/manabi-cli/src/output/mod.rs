use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(value: &Value) -> anyhow::Result<String> {
    let width = table::terminal_width();
    match value {
        Value::Array(items) => Ok(render_rows(items, width)),
        // paged envelopes render their items plus a footer
        Value::Object(map) if map.get("items").is_some_and(Value::is_array) => {
            let items = map["items"].as_array().map_or(&[][..], Vec::as_slice);
            let mut out = render_rows(items, width);
            if let (Some(page), Some(total)) = (map.get("page"), map.get("total")) {
                out.push_str(&format!("\npage {} · {} total", cell(page), cell(total)));
            }
            Ok(out)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render(&["key", "value"], &rows, width))
        }
        scalar => Ok(cell(scalar)),
    }
}

fn render_rows(items: &[Value], width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, width);
    }

    // column order follows the first appearance of each key
    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<String>>()
        })
        .collect::<Vec<_>>();
    table::render(&headers, &rows, width)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|v| !v.is_object() && !v.is_array()) => {
            items.iter().map(cell).collect::<Vec<_>>().join(", ")
        }
        Value::Object(map) => map
            .get("title")
            .or_else(|| map.get("username"))
            .or_else(|| map.get("name"))
            .map_or_else(|| value.to_string(), cell),
        other => other.to_string(),
    }
}
