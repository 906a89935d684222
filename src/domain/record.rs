// src/domain/record.rs
//
// Record base shared by every kind
//
// PRINCIPLES:
// - Identity and audit fields live in one value (RecordMeta)
// - Kinds compose RecordMeta instead of inheriting from a base entity
// - Validation is a pure predicate over the record's own fields

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// How a kind's rows leave the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Row is removed (`DELETE FROM ...`)
    Hard,
    /// Row stays, its active column is cleared
    Soft,
}

/// Identity and audit fields carried by every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    /// Store-assigned surrogate key, 0 until the record is inserted
    pub id: i64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last successful mutation
    pub updated_at: DateTime<Utc>,

    /// Soft-delete flag. Always true for hard-delete kinds.
    pub active: bool,
}

impl RecordMeta {
    /// Metadata for a record that has not been persisted yet
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            created_at: now,
            updated_at: now,
            active: true,
        }
    }

    /// Metadata pointing at an existing row, used for references
    pub fn with_id(id: i64) -> Self {
        Self { id, ..Self::new() }
    }

    /// Metadata rebuilt from a stored row
    pub fn loaded(
        id: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        active: bool,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            active,
        }
    }

    /// Refresh the last-update timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for RecordMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Behavior every kind provides to the generic repository
pub trait Record: Clone + std::fmt::Debug {
    /// Label used in log lines
    const KIND: &'static str;

    /// Whether `delete` removes the row or deactivates it
    const DELETE_MODE: DeleteMode = DeleteMode::Hard;

    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// Kind-specific invariants. Must pass before create/update reach the store.
    fn validate(&self) -> DomainResult<()>;

    /// Text fields scanned by cache search
    fn search_fields(&self) -> Vec<&str>;

    fn id(&self) -> i64 {
        self.meta().id
    }

    fn touch(&mut self) {
        self.meta_mut().touch();
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Case-insensitive substring match against the search fields
    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Text fields cannot be blank
pub(crate) fn require_text(field: &'static str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// A nested reference must point at a stored row
pub(crate) fn require_reference(reference: &'static str, id: i64) -> DomainResult<()> {
    if id <= 0 {
        return Err(DomainError::MissingReference { reference });
    }
    Ok(())
}
