// src/db/mod.rs
//
// Database module
//
// Provides:
// - The single process-wide connection
// - Schema migrations and demo data
// - Transaction helper

pub mod connection;
pub mod migrations;
pub mod transaction;

pub use connection::{default_database_path, Database, SharedConnection};

pub use migrations::{
    get_database_stats, initialize_database, seed_demo_data, verify_database_integrity,
    DatabaseStats,
};

pub use transaction::with_transaction;
