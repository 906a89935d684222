// src/config.rs
//
// Application configuration
//
// Resolved once at startup from command-line flags, falling back to
// environment variables (a `.env` file is loaded first), then defaults.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use crate::db::default_database_path;
use crate::error::AppResult;
use crate::logging::parse_level;
use crate::repositories::CacheSettings;

/// Console CRUD and reports over the Sakila movie-rental database
#[derive(Parser, Debug, Clone)]
#[command(name = "sakila-console")]
#[command(version, about, long_about = None)]
pub struct AppConfig {
    /// SQLite database file, created if missing [default: <data dir>/sakila/sakila.db]
    #[arg(long, env = "SAKILA_DATABASE")]
    pub database: Option<PathBuf>,

    /// Log file, appended to
    #[arg(long, default_value = "sakila.log", env = "SAKILA_LOG_FILE")]
    pub log_file: PathBuf,

    /// debug, info, warning or error
    #[arg(long, default_value = "info", env = "SAKILA_LOG_LEVEL")]
    pub log_level: String,

    /// Directory receiving exported reports
    #[arg(long, default_value = "reports", env = "SAKILA_REPORT_DIR")]
    pub report_dir: PathBuf,

    /// Maximum cached records per kind (unbounded when absent)
    #[arg(long, env = "SAKILA_CACHE_CAPACITY")]
    pub cache_capacity: Option<usize>,

    /// Seconds a bulk load is trusted before listing reloads it
    #[arg(long, env = "SAKILA_CACHE_TTL_SECS")]
    pub cache_ttl_secs: Option<u64>,

    /// Load the demo rows into an empty database
    #[arg(long)]
    pub seed: bool,
}

impl AppConfig {
    /// Parse the process arguments after loading `.env`
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }

    pub fn database_path(&self) -> AppResult<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }

    pub fn level_filter(&self) -> AppResult<LevelFilter> {
        parse_level(&self.log_level)
    }

    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            capacity: self.cache_capacity,
            ttl: self.cache_ttl_secs.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["sakila-console"]).unwrap();

        assert_eq!(config.report_dir, PathBuf::from("reports"));
        assert_eq!(config.cache_settings(), CacheSettings::unbounded());
        assert!(!config.seed);
        assert!(config.database_path().unwrap().ends_with("sakila/sakila.db"));
    }

    #[test]
    fn test_flags() {
        let config = AppConfig::try_parse_from([
            "sakila-console",
            "--database",
            "/tmp/sakila-test.db",
            "--log-level",
            "debug",
            "--cache-capacity",
            "50",
            "--cache-ttl-secs",
            "30",
            "--seed",
        ])
        .unwrap();

        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/sakila-test.db")
        );
        assert_eq!(config.level_filter().unwrap(), LevelFilter::DEBUG);
        assert_eq!(
            config.cache_settings(),
            CacheSettings {
                capacity: Some(50),
                ttl: Some(Duration::from_secs(30)),
            }
        );
        assert!(config.seed);
    }

    #[test]
    fn test_bad_capacity_is_rejected() {
        assert!(AppConfig::try_parse_from(["sakila-console", "--cache-capacity", "lots"]).is_err());
    }
}
