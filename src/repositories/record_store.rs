// src/repositories/record_store.rs
//
// Persistence primitives a kind must provide
//
// CRITICAL RULES:
// - Stores are DUMB data mappers
// - NO validation (the Repository owns it)
// - NO caching
// - Explicit SQL only

use crate::domain::Record;
use crate::error::AppResult;

/// Kind-specific statements behind a [`Repository`](super::Repository).
///
/// Every method reports storage faults as `Err`; turning them into the
/// repository's boolean/empty results is the caller's job.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore<T: Record + 'static> {
    /// Insert the record and return the store-generated id
    fn insert(&self, record: &T) -> AppResult<i64>;

    /// Overwrite every mutable column of the row with `record.id()`.
    /// Returns false when no row matched.
    fn update(&self, record: &T) -> AppResult<bool>;

    /// Remove or deactivate the row, depending on the kind.
    /// Returns false when no row matched.
    fn delete(&self, id: i64) -> AppResult<bool>;

    fn fetch_by_id(&self, id: i64) -> AppResult<Option<T>>;

    /// Full-table load, bounded for high-volume kinds
    fn fetch_all(&self) -> AppResult<Vec<T>>;

    /// Case-insensitive `LIKE %term%` over the kind's text columns
    fn search(&self, term: &str) -> AppResult<Vec<T>>;
}
