// src/reports/export.rs
//
// CSV / JSON export of query results

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::QueryResult;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// `<base>_<YYYY-MM-DD_HH-MM-SS>.<ext>`
pub fn report_file_name(base: &str, format: ExportFormat, at: DateTime<Local>) -> String {
    format!(
        "{}_{}.{}",
        base,
        at.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

/// Header line plus one line per row. NULL is written as an empty field.
pub fn to_csv(result: &QueryResult) -> String {
    let mut out = String::new();

    let header: Vec<String> = result.columns.iter().map(|c| csv_field(c)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &result.rows {
        let fields: Vec<String> = row
            .iter()
            .map(|value| value.as_deref().map(csv_field).unwrap_or_default())
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Quote fields holding a separator, quote or line break; double inner quotes
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One row serialized as an object keyed by column, in column order
struct JsonRow<'a> {
    columns: &'a [String],
    values: &'a [Option<String>],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Pretty-printed array of row objects, NULL as `null`
pub fn to_json(result: &QueryResult) -> AppResult<String> {
    let rows: Vec<JsonRow<'_>> = result
        .rows
        .iter()
        .map(|values| JsonRow {
            columns: &result.columns,
            values,
        })
        .collect();

    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Write a result into `dir` under a timestamped name and return the path
pub fn export_report(
    result: &QueryResult,
    format: ExportFormat,
    dir: &Path,
    base: &str,
) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(AppError::Io)?;

    let path = dir.join(report_file_name(base, format, Local::now()));
    let content = match format {
        ExportFormat::Csv => to_csv(result),
        ExportFormat::Json => to_json(result)?,
    };

    std::fs::write(&path, content).map_err(AppError::Io)?;
    info!(
        "{} report written: {} ({} rows)",
        format.extension().to_uppercase(),
        path.display(),
        result.rows.len()
    );

    Ok(path)
}
