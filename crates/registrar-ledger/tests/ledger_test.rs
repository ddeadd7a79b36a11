//! Enrollment ledger: uniqueness, slot validation, upsert modes, ordering.

use registrar_core::errors::{RegistrarError, ValidationError};
use registrar_core::models::{CourseType, Gender, NewEnrollment, SlotCategory, SlotMap};
use registrar_ledger::{EnrollmentLedger, UpsertMode};
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, date, seed_catalog};

#[test]
fn second_create_for_same_triple_fails() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");
    let ledger = EnrollmentLedger::new(&storage);

    let enrollment = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(1).id,
        date(2023, 7, 10),
    )
    .with_slot(SlotCategory::Major, catalog.subject("ENG-MJ").id);

    ledger
        .upsert_enrollment(&enrollment, UpsertMode::CreateOnly)
        .unwrap();
    let err = ledger
        .upsert_enrollment(&enrollment, UpsertMode::CreateOnly)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrarError::Validation(ValidationError::DuplicateEnrollment { .. })
    ));
}

#[test]
fn minor_subject_cannot_fill_major_slot() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");
    let ledger = EnrollmentLedger::new(&storage);

    let enrollment = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(1).id,
        date(2023, 7, 10),
    )
    .with_slot(SlotCategory::Major, catalog.subject("ECO-MN").id);

    let err = ledger
        .upsert_enrollment(&enrollment, UpsertMode::CreateOnly)
        .unwrap_err();
    match err {
        RegistrarError::Validation(ValidationError::SlotMismatch {
            slot,
            subject_code,
            actual,
        }) => {
            assert_eq!(slot, SlotCategory::Major);
            assert_eq!(subject_code, "ECO-MN");
            assert_eq!(actual, CourseType::Minor);
        }
        other => panic!("expected SlotMismatch, got {other:?}"),
    }
    assert!(ledger.list_enrollments(student.id).unwrap().is_empty());
}

#[test]
fn every_slot_accepts_only_its_course_type() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let ledger = EnrollmentLedger::new(&storage);

    for subject in catalog.subjects.values() {
        for slot in SlotCategory::ALL {
            let result = ledger.validate_slots(&SlotMap::empty().with(slot, subject.id));
            assert_eq!(
                result.is_ok(),
                slot.course_type() == subject.course_type,
                "{} in {slot}",
                subject.subject_code
            );
        }
    }
}

#[test]
fn unknown_references_are_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2023");
    let ledger = EnrollmentLedger::new(&storage);

    let base = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(1).id,
        date(2023, 7, 10),
    );

    let mut bad = base.clone();
    bad.student_id = 999;
    assert!(ledger
        .upsert_enrollment(&bad, UpsertMode::CreateOnly)
        .unwrap_err()
        .is_not_found());

    let mut bad = base.clone();
    bad.session_id = 999;
    assert!(ledger
        .upsert_enrollment(&bad, UpsertMode::CreateOnly)
        .unwrap_err()
        .is_not_found());

    let bad = base.with_slot(SlotCategory::Aec, 999);
    assert!(ledger
        .upsert_enrollment(&bad, UpsertMode::CreateOnly)
        .unwrap_err()
        .is_not_found());
}

#[test]
fn create_or_replace_overwrites_slots_and_flag() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Female, "2023");
    let ledger = EnrollmentLedger::new(&storage);

    let first = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(2).id,
        date(2023, 7, 10),
    )
    .with_slot(SlotCategory::Major, catalog.subject("ENG-MJ").id)
    .with_slot(SlotCategory::Skill, catalog.subject("COM-SEC").id);
    let created = ledger
        .upsert_enrollment(&first, UpsertMode::CreateOrReplace)
        .unwrap();

    let second = NewEnrollment::new(
        student.id,
        catalog.current_session.id,
        catalog.semester(2).id,
        date(2023, 7, 10),
    )
    .with_slot(SlotCategory::Major, catalog.subject("HIS-MJ").id)
    .enrolled(false);
    let replaced = ledger
        .upsert_enrollment(&second, UpsertMode::CreateOrReplace)
        .unwrap();

    assert_eq!(replaced.id, created.id);
    assert!(!replaced.is_enrolled);
    assert_eq!(
        replaced.slot_ids(),
        SlotMap::empty().with(SlotCategory::Major, catalog.subject("HIS-MJ").id)
    );
}

#[test]
fn set_slot_validates_and_keeps_other_slots() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Female, "2023");
    let ledger = EnrollmentLedger::new(&storage);

    let record = ledger
        .upsert_enrollment(
            &NewEnrollment::new(
                student.id,
                catalog.current_session.id,
                catalog.semester(1).id,
                date(2023, 7, 10),
            )
            .with_slot(SlotCategory::Minor, catalog.subject("POL-MN").id),
            UpsertMode::CreateOnly,
        )
        .unwrap();

    assert!(ledger
        .set_slot(record.id, SlotCategory::Vac1, Some(catalog.subject("YOG-VA2").id))
        .is_err());
    let record = ledger
        .set_slot(record.id, SlotCategory::Vac2, Some(catalog.subject("YOG-VA2").id))
        .unwrap();
    assert_eq!(record.slots.filled_count(), 2);

    let record = ledger.set_slot(record.id, SlotCategory::Minor, None).unwrap();
    assert!(record.subject(SlotCategory::Minor).is_none());
    assert!(record.subject(SlotCategory::Vac2).is_some());
}

#[test]
fn latest_enrollment_uses_session_start_then_semester() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let ledger = EnrollmentLedger::new(&storage);

    assert!(ledger.latest_enrollment(student.id).unwrap().is_none());

    for (session, semester) in [
        (&catalog.current_session, 1),
        (&catalog.previous_session, 6),
        (&catalog.current_session, 2),
    ] {
        ledger
            .upsert_enrollment(
                &NewEnrollment::new(
                    student.id,
                    session.id,
                    catalog.semester(semester).id,
                    session.start_date,
                ),
                UpsertMode::CreateOnly,
            )
            .unwrap();
    }

    let latest = ledger.latest_enrollment(student.id).unwrap().unwrap();
    assert_eq!(latest.session.id, catalog.current_session.id);
    assert_eq!(latest.semester.semester_number, 2);

    let sessions: Vec<_> = ledger
        .list_enrollments(student.id)
        .unwrap()
        .iter()
        .map(|r| r.session.start_date)
        .collect();
    assert!(sessions.windows(2).all(|w| w[0] >= w[1]));
    assert!(ledger.list_enrollments(999).unwrap_err().is_not_found());
}
