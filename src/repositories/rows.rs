// src/repositories/rows.rs
//
// Column helpers shared by the SQLite stores

use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::Row;

/// Read a timestamp column.
///
/// Accepts RFC 3339 (what this application writes) and the plain
/// `YYYY-MM-DD HH:MM:SS` form used by imported Sakila dumps, read as UTC.
pub(crate) fn timestamp(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    parse_timestamp(&raw)
}

pub(crate) fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Timestamp as stored
pub(crate) fn to_column(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// `LIKE` pattern for a case-insensitive contains match against `LOWER(col)`.
///
/// `%`, `_` and `\` in the term match literally; queries use `ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::from("%");
    for c in term.trim().to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_timestamp("2024-03-01T10:20:30Z").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_sakila_format() {
        let dt = parse_timestamp("2006-02-15 04:34:33").unwrap();
        assert_eq!(dt.month(), 2);
        assert_eq!(dt.second(), 33);
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("  DoE "), "%doe%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("%"), r"%\%%");
        assert_eq!(like_pattern("a_b"), r"%a\_b%");
        assert_eq!(like_pattern(r"c:\x"), r"%c:\\x%");
    }
}
