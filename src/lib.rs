// src/lib.rs
// Sakila Console - CRUD and reporting over the Sakila movie-rental database
//
// Architecture:
// - Domain-centric: every kind is a plain record plus its invariants
// - One generic repository: cache first, SQLite store behind a trait
// - Explicit: configuration, cache bounds and logging are set up in main
// - Errors stop at the repository boundary (logged, then false / None / [])

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod validation;

// ============================================================================
// SURFACES
// ============================================================================

pub mod config;
pub mod console;
pub mod logging;
pub mod reports;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use domain::{
    Actor, Address, City, Country, Customer, DeleteMode, Film, FilmRating, Inventory, Language,
    Record, RecordMeta, Staff, Store,
};

pub use error::{AppError, AppResult};

pub use repositories::{
    ActorRepository, CacheSettings, CityRepository, CountryRepository, CustomerRepository,
    FilmRepository, InventoryRepository, RecordStore, Repository,
};

pub use config::AppConfig;
pub use console::Console;
pub use db::Database;
pub use reports::{ExportFormat, QueryResult, Report};
