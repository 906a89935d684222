// src/db/transaction.rs
//
// Begin / commit / rollback around a unit of work

use log::{debug, warn};
use rusqlite::Connection;

use crate::error::AppResult;

/// Run `work` inside a transaction.
///
/// Commits when `work` returns Ok, rolls back and returns the original
/// error otherwise.
pub fn with_transaction<T, F>(conn: &Connection, work: F) -> AppResult<T>
where
    F: FnOnce(&Connection) -> AppResult<T>,
{
    let tx = conn.unchecked_transaction()?;
    debug!("Transaction started");

    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            debug!("Transaction committed");
            Ok(value)
        }
        Err(err) => {
            tx.rollback()?;
            warn!("Transaction rolled back: {}", err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (v INTEGER NOT NULL);").unwrap();
        conn
    }

    fn count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_commit_on_success() {
        let conn = conn();
        let inserted = with_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Ok(tx.last_insert_rowid())
        })
        .unwrap();

        assert_eq!(inserted, 1);
        assert_eq!(count(&conn), 1);
    }

    #[test]
    fn test_rollback_on_error() {
        let conn = conn();
        let result: AppResult<()> = with_transaction(&conn, |tx| {
            tx.execute("INSERT INTO t (v) VALUES (1)", [])?;
            Err(AppError::Other("boom".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(count(&conn), 0);
    }
}
