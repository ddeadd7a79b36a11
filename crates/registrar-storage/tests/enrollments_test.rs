//! Enrollment ledger persistence: uniqueness, slot writes, ordering, cascade.

use registrar_core::errors::{RegistrarError, ValidationError};
use registrar_core::models::{Gender, NewEnrollment, SlotCategory, SlotMap};
use registrar_core::traits::IRegistrarStorage;
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, date, seed_catalog};

#[test]
fn duplicate_triple_is_rejected_not_overwritten() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");

    let first = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(1).id,
        date(2023, 7, 10),
    )
    .with_slot(SlotCategory::Major, catalog.subject("ENG-MJ").id);
    let created = storage.insert_enrollment(&first).unwrap();

    let second = first
        .clone()
        .with_slot(SlotCategory::Major, catalog.subject("HIS-MJ").id);
    let err = storage.insert_enrollment(&second).unwrap_err();
    assert!(matches!(
        err,
        RegistrarError::Validation(ValidationError::DuplicateEnrollment { .. })
    ));

    let stored = storage.get_enrollment(created.id).unwrap().unwrap();
    assert_eq!(
        stored.subject(SlotCategory::Major).unwrap().subject_code,
        "ENG-MJ"
    );
    assert_eq!(storage.list_enrollments(student.id).unwrap().len(), 1);
}

#[test]
fn slots_are_set_and_cleared_independently() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Female, "2023");
    let record = storage
        .insert_enrollment(&NewEnrollment::new(
            student.id,
            catalog.current_session.id,
            catalog.semester(2).id,
            date(2023, 7, 10),
        ))
        .unwrap();
    assert!(record.slots.is_empty());

    let record = storage
        .set_enrollment_slot(record.id, SlotCategory::Aec, Some(catalog.subject("URD-AEC").id))
        .unwrap();
    let record = storage
        .set_enrollment_slot(record.id, SlotCategory::Md2, Some(catalog.subject("PSY-MD2").id))
        .unwrap();
    assert_eq!(record.slots.filled_count(), 2);

    let record = storage
        .set_enrollment_slot(record.id, SlotCategory::Aec, None)
        .unwrap();
    let filled: Vec<_> = record.slots.filled().map(|(slot, _)| slot).collect();
    assert_eq!(filled, vec![SlotCategory::Md2]);

    let replaced = storage
        .replace_enrollment_slots(
            record.id,
            &SlotMap::empty().with(SlotCategory::Major, catalog.subject("HIS-MJ").id),
        )
        .unwrap();
    assert_eq!(replaced.slot_ids(), SlotMap::empty().with(SlotCategory::Major, catalog.subject("HIS-MJ").id));
    assert!(replaced.updated_at >= replaced.created_at);
}

#[test]
fn enrolled_flag_toggles() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Female, "2023");
    let record = storage
        .insert_enrollment(
            &NewEnrollment::new(
                student.id,
                catalog.current_session.id,
                catalog.semester(1).id,
                date(2023, 7, 10),
            )
            .enrolled(false),
        )
        .unwrap();
    assert!(!record.is_enrolled);
    assert!(storage.set_enrolled(record.id, true).unwrap().is_enrolled);
    assert!(storage.set_enrolled(9999, true).unwrap_err().is_not_found());
}

#[test]
fn latest_prefers_newest_session_then_highest_semester() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2022");

    for (session, semester) in [
        (&catalog.previous_session, 1),
        (&catalog.current_session, 3),
        (&catalog.current_session, 4),
        (&catalog.previous_session, 2),
    ] {
        storage
            .insert_enrollment(&NewEnrollment::new(
                student.id,
                session.id,
                catalog.semester(semester).id,
                session.start_date,
            ))
            .unwrap();
    }

    let latest = storage.latest_enrollment(student.id).unwrap().unwrap();
    assert_eq!(latest.session.session_code, "2023-24");
    assert_eq!(latest.semester.semester_number, 4);

    let order: Vec<_> = storage
        .list_enrollments(student.id)
        .unwrap()
        .into_iter()
        .map(|r| (r.session.session_code, r.semester.semester_number))
        .collect();
    assert_eq!(
        order,
        vec![
            ("2023-24".to_string(), 4),
            ("2023-24".to_string(), 3),
            ("2022-23".to_string(), 2),
            ("2022-23".to_string(), 1),
        ]
    );
}

#[test]
fn no_enrollments_means_no_latest() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    assert!(storage.latest_enrollment(student.id).unwrap().is_none());
}

#[test]
fn deleting_student_cascades_to_enrollments() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let record = storage
        .insert_enrollment(&NewEnrollment::new(
            student.id,
            catalog.current_session.id,
            catalog.semester(1).id,
            date(2023, 7, 10),
        ))
        .unwrap();

    storage.delete_student(student.id).unwrap();
    assert!(storage.get_enrollment(record.id).unwrap().is_none());
    // With the enrollment gone the session is free to delete.
    storage.delete_session(catalog.current_session.id).unwrap();
}

#[test]
fn replace_enrollment_writes_slots_and_flag_together() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");
    let record = storage
        .insert_enrollment(
            &NewEnrollment::new(
                student.id,
                catalog.current_session.id,
                catalog.semester(1).id,
                date(2023, 7, 10),
            )
            .with_slot(SlotCategory::Major, catalog.subject("ENG-MJ").id)
            .with_slot(SlotCategory::Minor, catalog.subject("ECO-MN").id),
        )
        .unwrap();

    let replaced = storage
        .replace_enrollment(
            record.id,
            &SlotMap::empty().with(SlotCategory::Major, catalog.subject("HIS-MJ").id),
            false,
        )
        .unwrap();
    assert!(!replaced.is_enrolled);
    assert_eq!(replaced.subject(SlotCategory::Major).unwrap().subject_code, "HIS-MJ");
    assert!(replaced.subject(SlotCategory::Minor).is_none());
    assert!(replaced.updated_at >= record.updated_at);
}

#[test]
fn failed_replace_leaves_record_untouched() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");
    let record = storage
        .insert_enrollment(
            &NewEnrollment::new(
                student.id,
                catalog.current_session.id,
                catalog.semester(1).id,
                date(2023, 7, 10),
            )
            .with_slot(SlotCategory::Major, catalog.subject("ENG-MJ").id),
        )
        .unwrap();

    // The dangling subject id fails the foreign key after the old slots
    // were already deleted; the whole change must roll back.
    let dangling = SlotMap::empty().with(SlotCategory::Major, 9_999);
    assert!(storage.replace_enrollment(record.id, &dangling, false).is_err());

    let stored = storage.get_enrollment(record.id).unwrap().unwrap();
    assert!(stored.is_enrolled);
    assert_eq!(stored.subject(SlotCategory::Major).unwrap().subject_code, "ENG-MJ");

    assert!(storage
        .replace_enrollment(record.id + 1, &SlotMap::empty(), true)
        .unwrap_err()
        .is_not_found());
}
