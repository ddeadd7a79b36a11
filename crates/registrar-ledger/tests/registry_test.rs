//! Student registry: admission validation and exact-one search.

use registrar_core::errors::{RegistrarError, ValidationError};
use registrar_core::models::Gender;
use registrar_ledger::StudentRegistry;
use registrar_storage::StorageEngine;
use test_fixtures::sample_student;

#[test]
fn search_by_registration_or_roll_number() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let registry = StudentRegistry::new(&storage);
    let admitted = registry
        .admit(&sample_student("101", "Aisha", Gender::Female, "2023"))
        .unwrap();

    assert_eq!(registry.search("UR-101").unwrap().id, admitted.id);
    assert_eq!(registry.search(" 101 ").unwrap().id, admitted.id);
}

#[test]
fn search_without_match_is_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let registry = StudentRegistry::new(&storage);
    let err = registry.search("UR-404").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(
        registry.search("   ").unwrap_err(),
        RegistrarError::Validation(ValidationError::InvalidInput { .. })
    ));
}

#[test]
fn search_matching_two_students_is_ambiguous() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let registry = StudentRegistry::new(&storage);
    registry
        .admit(&sample_student("UR-7", "First", Gender::Male, "2023"))
        .unwrap();
    registry
        .admit(&sample_student("7", "Second", Gender::Female, "2023"))
        .unwrap();

    match registry.search("UR-7").unwrap_err() {
        RegistrarError::Validation(ValidationError::AmbiguousMatch { matches, .. }) => {
            assert_eq!(matches, 2)
        }
        other => panic!("expected AmbiguousMatch, got {other:?}"),
    }
}

#[test]
fn blank_identifier_rejected_at_admission() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let registry = StudentRegistry::new(&storage);
    let mut details = sample_student("101", "Aisha", Gender::Female, "2023");
    details.class_roll_no = " ".to_string();
    assert!(matches!(
        registry.admit(&details).unwrap_err(),
        RegistrarError::Validation(ValidationError::InvalidInput { .. })
    ));
}

#[test]
fn deactivation_hides_from_active_list() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let registry = StudentRegistry::new(&storage);
    let student = registry
        .admit(&sample_student("101", "Aisha", Gender::Female, "2023"))
        .unwrap();

    registry.set_active(student.id, false).unwrap();
    assert!(registry.list(true).unwrap().is_empty());
    assert_eq!(registry.list(false).unwrap().len(), 1);
    // Search still finds withdrawn students.
    assert!(!registry.search("101").unwrap().is_active);
}
