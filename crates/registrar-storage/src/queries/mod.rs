//! Per-table query modules. Every function takes a plain `&Connection`,
//! so callers pass either a pooled reader, the writer, or a transaction.

pub mod catalog;
pub mod certificates;
pub mod enrollments;
pub mod facts;
pub mod students;
pub mod util;
