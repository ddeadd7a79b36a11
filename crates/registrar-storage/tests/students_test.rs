//! Student persistence: identifiers, search, activation, cascade delete.

use registrar_core::errors::{RegistrarError, ValidationError};
use registrar_core::models::Gender;
use registrar_core::traits::IRegistrarStorage;
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, sample_student};

#[test]
fn create_and_get_roundtrips_profile() {
    let storage = StorageEngine::open_in_memory().expect("in-memory storage");
    let details = sample_student("101", "Aisha Mir", Gender::Female, "2023");

    let created = storage.create_student(&details).expect("create");
    assert!(created.is_active);
    assert_eq!(created.details, details);

    let fetched = storage.get_student(created.id).unwrap().expect("present");
    assert_eq!(fetched, created);
    assert!(storage.get_student(created.id + 1).unwrap().is_none());
}

#[test]
fn each_identifier_is_unique() {
    let storage = StorageEngine::open_in_memory().unwrap();
    storage
        .create_student(&sample_student("101", "A", Gender::Male, "2023"))
        .unwrap();

    let mut clash = sample_student("102", "B", Gender::Male, "2023");
    clash.u_registration_no = "UR-101".to_string();
    let err = storage.create_student(&clash).unwrap_err();
    match err {
        RegistrarError::Validation(ValidationError::DuplicateIdentifier { field, value }) => {
            assert_eq!(field, "u_registration_no");
            assert_eq!(value, "UR-101");
        }
        other => panic!("expected DuplicateIdentifier, got {other:?}"),
    }

    let mut clash = sample_student("103", "C", Gender::Male, "2023");
    clash.class_roll_no = "101".to_string();
    assert!(matches!(
        storage.create_student(&clash),
        Err(RegistrarError::Validation(ValidationError::DuplicateIdentifier { .. }))
    ));
}

#[test]
fn identifier_search_matches_either_column() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2023");

    let by_reg = storage.find_students_by_identifier("UR-101").unwrap();
    let by_roll = storage.find_students_by_identifier("101").unwrap();
    assert_eq!(by_reg, vec![student.clone()]);
    assert_eq!(by_roll, vec![student]);
    assert!(storage.find_students_by_identifier("RF-101").unwrap().is_empty());
}

#[test]
fn identifier_shared_across_columns_returns_both() {
    let storage = StorageEngine::open_in_memory().unwrap();
    admit_student(&storage, "UR-200", Gender::Male, "2023");
    admit_student(&storage, "200", Gender::Female, "2023");

    // "UR-200" is one student's roll number and the other's registration number.
    let hits = storage.find_students_by_identifier("UR-200").unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn list_orders_by_name_and_filters_inactive() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let zoya = storage
        .create_student(&sample_student("1", "Zoya", Gender::Female, "2023"))
        .unwrap();
    let adil = storage
        .create_student(&sample_student("2", "Adil", Gender::Male, "2023"))
        .unwrap();

    let names: Vec<_> = storage
        .list_students(false)
        .unwrap()
        .into_iter()
        .map(|s| s.details.student_name)
        .collect();
    assert_eq!(names, vec!["Adil", "Zoya"]);

    storage.set_student_active(adil.id, false).unwrap();
    let active = storage.list_students(true).unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, zoya.id);
    assert!(!storage.get_student(adil.id).unwrap().unwrap().is_active);
}

#[test]
fn set_active_on_unknown_student_is_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let err = storage.set_student_active(42, false).unwrap_err();
    assert!(err.is_not_found());
    assert!(storage.delete_student(42).unwrap_err().is_not_found());
}
