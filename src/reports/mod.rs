// src/reports/mod.rs
//
// Fixed reporting queries and their export
//
// PRINCIPLES:
// - Every report is plain SQL returning a QueryResult
// - Values are kept as nullable text; formatting belongs to the caller
// - Export never touches the database

pub mod export;
pub mod queries;

pub use export::{export_report, report_file_name, to_csv, to_json, ExportFormat};
pub use queries::Report;

use rusqlite::types::ValueRef;
use rusqlite::{Params, Statement};

use crate::error::AppResult;

/// Column names plus rows of nullable text values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl QueryResult {
    /// Run a prepared statement and collect every row as text
    pub fn from_statement<P: Params>(stmt: &mut Statement<'_>, params: P) -> AppResult<Self> {
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let width = columns.len();

        let rows = stmt
            .query_map(params, |row| {
                (0..width)
                    .map(|idx| row.get_ref(idx).map(value_to_text))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Value of `column` in row `row`, `None` for NULL or unknown columns
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }

    /// Fixed-width text table for the console
    pub fn render_table(&self) -> String {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (idx, value) in row.iter().enumerate() {
                let len = value.as_deref().map_or(4, |v| v.chars().count());
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(len);
                }
            }
        }

        let format_line = |cells: Vec<&str>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = String::new();
        out.push_str(&format_line(self.columns.iter().map(String::as_str).collect()));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &self.rows {
            out.push_str(&format_line(
                row.iter().map(|v| v.as_deref().unwrap_or("NULL")).collect(),
            ));
            out.push('\n');
        }
        out
    }
}

fn value_to_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_collect_keeps_nulls_and_types() {
        let conn = Connection::open_in_memory().unwrap();
        let mut stmt = conn
            .prepare("SELECT 1 AS id, 'ACADEMY DINOSAUR' AS title, NULL AS note, 2.5 AS rate")
            .unwrap();

        let result = QueryResult::from_statement(&mut stmt, []).unwrap();

        assert_eq!(result.columns, vec!["id", "title", "note", "rate"]);
        assert_eq!(result.value(0, "id"), Some("1"));
        assert_eq!(result.value(0, "title"), Some("ACADEMY DINOSAUR"));
        assert_eq!(result.value(0, "note"), None);
        assert_eq!(result.value(0, "rate"), Some("2.5"));
    }

    #[test]
    fn test_render_table() {
        let result = QueryResult {
            columns: vec!["name".into(), "total".into()],
            rows: vec![
                vec![Some("Action".into()), Some("2".into())],
                vec![Some("Documentary".into()), None],
            ],
        };

        let table = result.render_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "name        | total");
        assert_eq!(lines[1], "------------+------");
        assert_eq!(lines[2], "Action      | 2");
        assert_eq!(lines[3], "Documentary | NULL");
    }
}
