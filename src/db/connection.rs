// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Exactly one connection per process, opened once at startup
// - Repositories share it through an explicit handle, never a global
// - Close is explicit; dropping the last handle closes as well
// - Single-threaded use only (Rc, not Arc)

use log::{info, warn};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::db::migrations::initialize_database;
use crate::error::{AppError, AppResult};

/// Handle given to every repository
pub type SharedConnection = Rc<Connection>;

/// How long SQLite waits on a locked database before failing a statement
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Owner of the process-wide connection
pub struct Database {
    conn: SharedConnection,
    location: String,
}

impl Database {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open(path: &Path) -> AppResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(AppError::Io)?;
            }
        }

        info!("Connecting to database: {}", path.display());
        let conn = Connection::open(path)?;
        Self::prepare(conn, path.display().to_string())
    }

    /// In-memory database with the full schema, used by tests and demos
    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, ":memory:".to_string())
    }

    fn prepare(conn: Connection, location: String) -> AppResult<Self> {
        configure(&conn)?;
        initialize_database(&conn)?;
        info!("Database connection established: {}", location);

        Ok(Self {
            conn: Rc::new(conn),
            location,
        })
    }

    /// Shared handle for a repository
    pub fn connection(&self) -> SharedConnection {
        Rc::clone(&self.conn)
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Close the connection.
    ///
    /// Repositories must be dropped first; if a handle is still alive the
    /// connection closes when that handle drops instead.
    pub fn close(self) -> AppResult<()> {
        match Rc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.close().map_err(|(_, e)| AppError::Database(e))?;
                info!("Database connection closed: {}", self.location);
            }
            Err(conn) => {
                warn!(
                    "Database connection still shared by {} handle(s); it closes when they drop",
                    Rc::strong_count(&conn) - 1
                );
            }
        }
        Ok(())
    }
}

/// Per-connection settings
///
/// - Foreign keys enabled (not default in SQLite)
/// - Busy timeout set to avoid immediate lock errors
fn configure(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
    Ok(())
}

/// Default database file location
///
/// Path structure: {APP_DATA}/sakila/sakila.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("sakila").join("sakila.db"))
}
