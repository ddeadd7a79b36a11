//! Certificate persistence: gate inside the transaction, snapshots, history.

use chrono::NaiveDate;
use registrar_core::errors::{IssuanceError, RegistrarError, RegistrarResult, ValidationError};
use registrar_core::models::{CertificateType, Gender, NewCertificate, NewEnrollment};
use registrar_core::traits::IRegistrarStorage;
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, date, seed_catalog};

fn bonafide(student_id: i64, issue_date: NaiveDate) -> NewCertificate {
    NewCertificate {
        student_id,
        certificate_type: CertificateType::Bonafide,
        certificate_number: None,
        issue_date,
        purpose: Some("transfer".to_string()),
        remarks: None,
        issued_by: Some("Admin".to_string()),
    }
}

fn allow(_: Option<NaiveDate>) -> RegistrarResult<()> {
    Ok(())
}

#[test]
fn record_snapshots_latest_enrollment() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let enrollment = storage
        .insert_enrollment(&NewEnrollment::new(
            student.id,
            catalog.current_session.id,
            catalog.semester(3).id,
            date(2023, 7, 10),
        ))
        .unwrap();

    let snapshot = storage
        .record_certificate(&bonafide(student.id, date(2024, 3, 1)), &allow)
        .unwrap();
    assert_eq!(snapshot.student.id, student.id);
    assert_eq!(snapshot.certificate.enrollment_id, Some(enrollment.id));
    assert_eq!(snapshot.enrollment.as_ref().map(|e| e.id), Some(enrollment.id));
    assert_eq!(snapshot.certificate.issue_date, date(2024, 3, 1));

    let fetched = storage
        .certificate_snapshot(snapshot.certificate.id, CertificateType::Bonafide)
        .unwrap()
        .unwrap();
    assert_eq!(fetched, snapshot);
}

#[test]
fn gate_sees_last_issue_date_and_refusal_writes_nothing() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Female, "2022");
    storage
        .record_certificate(&bonafide(student.id, date(2024, 3, 1)), &allow)
        .unwrap();

    let seen = std::cell::Cell::new(None);
    let refuse = |last: Option<NaiveDate>| -> RegistrarResult<()> {
        seen.set(last);
        Err(IssuanceError::Ineligible {
            certificate_type: CertificateType::Bonafide,
            last_issued: last.unwrap_or_default(),
            remaining_days: 10,
        }
        .into())
    };
    let err = storage
        .record_certificate(&bonafide(student.id, date(2024, 3, 2)), &refuse)
        .unwrap_err();
    assert!(err.is_not_eligible());
    assert_eq!(seen.get(), Some(date(2024, 3, 1)));
    assert_eq!(
        storage
            .list_certificates(student.id, Some(CertificateType::Bonafide))
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn unknown_student_is_not_found() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let err = storage
        .record_certificate(&bonafide(77, date(2024, 3, 1)), &allow)
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn snapshot_survives_enrollment_deletion() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let enrollment = storage
        .insert_enrollment(&NewEnrollment::new(
            student.id,
            catalog.current_session.id,
            catalog.semester(1).id,
            date(2023, 7, 10),
        ))
        .unwrap();
    let issued = storage
        .record_certificate(&bonafide(student.id, date(2024, 3, 1)), &allow)
        .unwrap();

    storage.delete_enrollment(enrollment.id).unwrap();

    let snapshot = storage
        .certificate_snapshot(issued.certificate.id, CertificateType::Bonafide)
        .unwrap()
        .expect("certificate still present");
    assert!(snapshot.enrollment.is_none());
    assert_eq!(snapshot.certificate.enrollment_id, None);
}

#[test]
fn snapshot_lookup_checks_type() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let issued = storage
        .record_certificate(&bonafide(student.id, date(2024, 3, 1)), &allow)
        .unwrap();
    assert!(storage
        .certificate_snapshot(issued.certificate.id, CertificateType::Degree)
        .unwrap()
        .is_none());
}

#[test]
fn history_is_newest_first_and_filterable() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    for day in [date(2023, 1, 5), date(2024, 2, 1), date(2023, 9, 9)] {
        storage
            .record_certificate(&bonafide(student.id, day), &allow)
            .unwrap();
    }
    let mut degree = bonafide(student.id, date(2024, 5, 5));
    degree.certificate_type = CertificateType::Degree;
    storage.record_certificate(&degree, &allow).unwrap();

    let dates: Vec<_> = storage
        .list_certificates(student.id, Some(CertificateType::Bonafide))
        .unwrap()
        .into_iter()
        .map(|c| c.issue_date)
        .collect();
    assert_eq!(dates, vec![date(2024, 2, 1), date(2023, 9, 9), date(2023, 1, 5)]);
    assert_eq!(storage.list_certificates(student.id, None).unwrap().len(), 4);
    assert_eq!(
        storage
            .last_issue_date(student.id, CertificateType::Bonafide)
            .unwrap(),
        Some(date(2024, 2, 1))
    );
    assert_eq!(
        storage
            .last_issue_date(student.id, CertificateType::MarksSheet)
            .unwrap(),
        None
    );
}

#[test]
fn certificate_numbers_are_unique_when_present() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let a = storage
        .record_certificate(&bonafide(student.id, date(2023, 1, 1)), &allow)
        .unwrap();
    let b = storage
        .record_certificate(&bonafide(student.id, date(2024, 1, 1)), &allow)
        .unwrap();

    storage
        .assign_certificate_number(a.certificate.id, "BC-0001")
        .unwrap();
    let err = storage
        .assign_certificate_number(b.certificate.id, "BC-0001")
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrarError::Validation(ValidationError::DuplicateIdentifier { .. })
    ));
    assert_eq!(
        storage
            .get_certificate(a.certificate.id)
            .unwrap()
            .unwrap()
            .certificate_number
            .as_deref(),
        Some("BC-0001")
    );
}

#[test]
fn deleting_student_removes_certificates() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "101", Gender::Male, "2022");
    let issued = storage
        .record_certificate(&bonafide(student.id, date(2023, 1, 1)), &allow)
        .unwrap();
    storage.delete_student(student.id).unwrap();
    assert!(storage
        .get_certificate(issued.certificate.id)
        .unwrap()
        .is_none());
}
