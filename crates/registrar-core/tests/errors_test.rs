//! Error codes and the "not eligible right now" classification.

use chrono::NaiveDate;

use registrar_core::errors::{
    IssuanceError, RegistrarError, RegistrarErrorCode, StorageError, ValidationError,
};
use registrar_core::models::{CertificateType, CourseType, SlotCategory};

#[test]
fn ineligible_and_conflict_both_read_as_not_eligible() {
    let ineligible: RegistrarError = IssuanceError::Ineligible {
        certificate_type: CertificateType::Bonafide,
        last_issued: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        remaining_days: 42,
    }
    .into();
    let conflict: RegistrarError = IssuanceError::Conflict {
        certificate_type: CertificateType::Bonafide,
        student_id: 7,
    }
    .into();

    assert!(ineligible.is_not_eligible());
    assert!(conflict.is_not_eligible());
    assert_eq!(ineligible.remaining_days(), Some(42));
    assert_eq!(conflict.remaining_days(), None);
    assert_eq!(ineligible.error_code(), "INELIGIBLE");
    assert_eq!(conflict.error_code(), "CONFLICT");
}

#[test]
fn codes_delegate_through_the_aggregate() {
    let not_found = RegistrarError::not_found("student", 12);
    assert_eq!(not_found.error_code(), "NOT_FOUND");
    assert!(not_found.is_not_found());
    assert_eq!(
        not_found.boundary_string(),
        "[NOT_FOUND] student not found: 12"
    );

    let mismatch: RegistrarError = ValidationError::SlotMismatch {
        slot: SlotCategory::Major,
        subject_code: "ENG-MIN".to_string(),
        actual: CourseType::Minor,
    }
    .into();
    assert_eq!(mismatch.error_code(), "VALIDATION_ERROR");
    assert!(mismatch.to_string().contains("major_course"));

    let busy: RegistrarError = StorageError::Busy {
        message: "locked".to_string(),
    }
    .into();
    assert_eq!(busy.error_code(), "DB_BUSY");
    assert!(!busy.is_not_eligible());
}
