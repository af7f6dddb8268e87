//! Rendering of command results

use crate::config::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;

/// Render a value in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize output as JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).context("Failed to serialize output as YAML")
        }
        OutputFormat::Table => {
            let value = serde_json::to_value(value).context("Failed to serialize output")?;
            Ok(render_table(&value))
        }
    }
}

/// Aligned plain-text table
///
/// Arrays of objects become one row per element with one column per key.
/// A single object becomes a key/value listing. Anything else is printed as is.
pub fn render_table(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "No items".to_string(),
        Value::Array(items) => {
            let mut columns: Vec<String> = Vec::new();
            for item in items {
                if let Value::Object(map) = item {
                    for key in map.keys() {
                        if !columns.contains(key) {
                            columns.push(key.clone());
                        }
                    }
                }
            }
            if columns.is_empty() {
                return items.iter().map(cell).collect::<Vec<_>>().join("\n");
            }

            let header: Vec<String> = columns.iter().map(|c| c.to_uppercase()).collect();
            let rows: Vec<Vec<String>> = items
                .iter()
                .map(|item| {
                    columns
                        .iter()
                        .map(|c| item.get(c).map(cell).unwrap_or_default())
                        .collect()
                })
                .collect();
            align(std::iter::once(header).chain(rows).collect())
        }
        Value::Object(map) => align(
            map.iter()
                .map(|(k, v)| vec![format!("{}:", k), cell(v)])
                .collect(),
        ),
        other => cell(other),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

fn align(rows: Vec<Vec<String>>) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let line: String = row
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{:<width$}", c, width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ");
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
