//! Catalog service: input validation and current-session handling.

use registrar_core::errors::{RegistrarError, ValidationError};
use registrar_core::models::{CourseType, NewSession, NewSubject};
use registrar_ledger::Catalog;
use registrar_storage::StorageEngine;
use test_fixtures::{date, seed_catalog};

#[test]
fn session_must_end_after_it_starts() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = Catalog::new(&storage);
    let err = catalog
        .create_session(&NewSession {
            session_code: "2025-26".to_string(),
            start_date: date(2025, 7, 1),
            end_date: date(2025, 7, 1),
            is_current: false,
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrarError::Validation(ValidationError::InvalidInput { .. })
    ));
}

#[test]
fn exclusive_current_leaves_one_flagged() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let seeded = seed_catalog(&storage);
    let catalog = Catalog::new(&storage);

    catalog.set_current(seeded.previous_session.id, false).unwrap();
    assert_eq!(catalog.current_sessions().unwrap().len(), 2);

    catalog.set_current(seeded.current_session.id, true).unwrap();
    let current = catalog.current_sessions().unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].session_code, "2023-24");

    catalog.clear_current(seeded.current_session.id).unwrap();
    assert!(catalog.current_sessions().unwrap().is_empty());
}

#[test]
fn lookups_report_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = Catalog::new(&storage);
    assert!(catalog.session(1).unwrap_err().is_not_found());
    assert!(catalog.semester_by_number(9).unwrap_err().is_not_found());
    assert!(catalog.subject_by_code("NOPE").unwrap_err().is_not_found());
}

#[test]
fn semester_zero_and_blank_subject_rejected() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = Catalog::new(&storage);
    assert!(catalog.create_semester(0, "Zeroth").is_err());
    assert!(catalog
        .create_subject(&NewSubject {
            subject_code: "".to_string(),
            subject_name: "Nameless".to_string(),
            course_type: CourseType::Major,
        })
        .is_err());

    let created = catalog.create_semester(1, " 1st ").unwrap();
    assert_eq!(created.semester_name, "1st");
    assert_eq!(catalog.semesters().unwrap().len(), 1);
}
