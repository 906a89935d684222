// src/domain/mod.rs
//
// Domain Root - the single source of truth for the domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod actor;
pub mod address;
pub mod city;
pub mod country;
pub mod customer;
pub mod film;
pub mod inventory;
pub mod language;
pub mod record;
pub mod staff;
pub mod store;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Record base
pub use record::{DeleteMode, Record, RecordMeta};

// Kinds with a repository
pub use actor::{validate_actor, Actor};
pub use city::{validate_city, City};
pub use country::{validate_country, Country};
pub use customer::{validate_customer, Customer};
pub use film::{validate_film, Film, FilmRating};
pub use inventory::{validate_inventory, Inventory};

// Kinds loaded only as references
pub use address::{validate_address, Address};
pub use language::{validate_language, Language};
pub use staff::{validate_staff, Staff};
pub use store::{validate_store, Store};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of a kind's invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Missing {reference} reference")]
    MissingReference { reference: &'static str },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
