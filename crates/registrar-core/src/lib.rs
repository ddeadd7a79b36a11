//! # registrar-core
//!
//! Foundation crate for the student registrar.
//! Defines the domain models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RegistrarConfig;
pub use errors::{RegistrarError, RegistrarResult};
pub use models::{
    AcademicSession, CertificateRecord, CertificateType, CourseType, EnrollmentRecord, Gender,
    Semester, SlotCategory, SlotMap, Student, Subject,
};
