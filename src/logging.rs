// src/logging.rs
//
// Process logging on a `tracing_subscriber` registry
//
// Lines look like `[2024-01-31 09:05:07] [INFO] message`. Every line goes to
// stderr and, when a log file is configured, is appended to it. The crate logs
// through the `log` macros; `init` bridges them into tracing.

use std::fmt;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{AppError, AppResult};

/// Event format: `[timestamp] [LEVEL] fields`, no targets or spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SakilaFormat;

impl<S, N> FormatEvent<S, N> for SakilaFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} ",
            line_prefix(event.metadata().level(), Local::now())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Label printed for a level. TRACE is folded into DEBUG.
pub fn level_label(level: &Level) -> &'static str {
    if *level == Level::ERROR {
        "ERROR"
    } else if *level == Level::WARN {
        "WARNING"
    } else if *level == Level::INFO {
        "INFO"
    } else {
        "DEBUG"
    }
}

pub fn line_prefix(level: &Level, at: DateTime<Local>) -> String {
    format!(
        "[{}] [{}]",
        at.format("%Y-%m-%d %H:%M:%S"),
        level_label(level)
    )
}

/// Parse a configured level name (`debug`, `info`, `warning`/`warn`, `error`, `off`)
pub fn parse_level(value: &str) -> AppResult<LevelFilter> {
    match value.trim().to_lowercase().as_str() {
        "warning" => Ok(LevelFilter::WARN),
        other => other
            .parse::<LevelFilter>()
            .map_err(|_| AppError::Other(format!("Unknown log level '{}'", value))),
    }
}

/// Registry with a stderr layer and, if `log_file` is given, a layer
/// appending to it. Missing parent directories are created.
pub fn build_subscriber(
    level: LevelFilter,
    log_file: Option<&Path>,
) -> AppResult<impl Subscriber + Send + Sync + 'static> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .event_format(SakilaFormat)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    Ok(tracing_subscriber::registry()
        .with(level)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(SakilaFormat)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer))
}

/// Install the process subscriber and route `log` records into it.
/// Fails if a subscriber or logger is already installed.
pub fn init(level: LevelFilter, log_file: Option<&Path>) -> AppResult<()> {
    build_subscriber(level, log_file)?.try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn test_line_prefix() {
        let at = Local.with_ymd_and_hms(2024, 1, 31, 9, 5, 7).unwrap();
        assert_eq!(
            line_prefix(&Level::WARN, at),
            "[2024-01-31 09:05:07] [WARNING]"
        );
        assert_eq!(line_prefix(&Level::TRACE, at), "[2024-01-31 09:05:07] [DEBUG]");
        assert_eq!(level_label(&Level::ERROR), "ERROR");
        assert_eq!(level_label(&Level::INFO), "INFO");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level("warning").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("warn").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("off").unwrap(), LevelFilter::OFF);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_appends_enabled_lines_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs").join("sakila.log");
        let subscriber = build_subscriber(LevelFilter::INFO, Some(&path)).unwrap();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Actor {} created", 1);
            tracing::debug!("cache hit");
            tracing::error!("store failed");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] [INFO] Actor 1 created"));
        assert!(lines[1].ends_with("] [ERROR] store failed"));
    }

    #[test]
    fn test_existing_file_is_appended() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sakila.log");
        std::fs::write(&path, "previous run\n").unwrap();

        let subscriber = build_subscriber(LevelFilter::DEBUG, Some(&path)).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("started");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert!(content.trim_end().ends_with("[WARNING] started"));
    }
}
