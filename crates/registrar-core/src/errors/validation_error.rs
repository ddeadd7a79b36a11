//! Correctable input errors surfaced to the operator.

use super::error_code::{self, RegistrarErrorCode};
use crate::models::{CourseType, SlotCategory};

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error(
        "student {student_id} is already enrolled for session {session_id}, semester {semester_id}"
    )]
    DuplicateEnrollment {
        student_id: i64,
        session_id: i64,
        semester_id: i64,
    },

    #[error("subject {subject_code} is a {actual} course and cannot fill the {slot} slot")]
    SlotMismatch {
        slot: SlotCategory,
        subject_code: String,
        actual: CourseType,
    },

    #[error("identifier '{identifier}' matches {matches} students")]
    AmbiguousMatch { identifier: String, matches: usize },

    #[error("{field} '{value}' is already in use")]
    DuplicateIdentifier { field: String, value: String },

    #[error("{entity} {key} is still referenced by enrollment records")]
    InUse { entity: String, key: String },

    #[error("invalid {field}: {message}")]
    InvalidInput { field: String, message: String },
}

impl ValidationError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl RegistrarErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
