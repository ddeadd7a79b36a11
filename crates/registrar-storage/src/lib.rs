//! # registrar-storage
//!
//! SQLite persistence for students, the catalog, the enrollment ledger,
//! and issued certificates.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::StorageEngine;
