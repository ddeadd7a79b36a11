//! # registrar-ledger
//!
//! Data-entry boundary over storage: catalog maintenance, student admission
//! and search, and the enrollment ledger with slot validation.

pub mod catalog;
pub mod ledger;
pub mod registry;

pub use catalog::Catalog;
pub use ledger::{EnrollmentLedger, UpsertMode};
pub use registry::StudentRegistry;
