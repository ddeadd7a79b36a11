//! Text layout of the bonafide certificate.

use std::sync::Arc;

use registrar_core::config::{InstitutionConfig, RegistrarConfig};
use registrar_core::models::{CertificateType, Gender, NewEnrollment};
use registrar_core::traits::{FixedClock, IDocumentRenderer};
use registrar_certificates::{CertificateNumbering, IssuanceEngine, IssueRequest, TextBonafideRenderer};
use registrar_ledger::{EnrollmentLedger, UpsertMode};
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, date, seed_catalog};

fn institution() -> InstitutionConfig {
    InstitutionConfig {
        office_line: Some("Office of the Principal".to_string()),
        college_name: Some("Sample Degree College".to_string()),
        territory_line: None,
        contact_line: Some("Phone 0000".to_string()),
        signatory: Some("Principal, Sample Degree College".to_string()),
    }
}

fn issue_text(gender: Gender, enrolled_semester: Option<u32>) -> (String, String) {
    let storage = StorageEngine::open_in_memory().unwrap();
    let catalog = seed_catalog(&storage);
    let student = admit_student(&storage, "207", gender, "2022");
    if let Some(number) = enrolled_semester {
        EnrollmentLedger::new(&storage)
            .upsert_enrollment(
                &NewEnrollment::new(
                    student.id,
                    catalog.current_session.id,
                    catalog.semester(number).id,
                    date(2023, 7, 20),
                ),
                UpsertMode::CreateOnly,
            )
            .unwrap();
    }
    let renderer = TextBonafideRenderer::new(institution(), CertificateNumbering::default());
    let engine = IssuanceEngine::new(
        &storage,
        &RegistrarConfig::default(),
        Arc::new(FixedClock::new(date(2024, 3, 1))),
        Arc::new(renderer),
    );
    let issued = engine
        .issue(&IssueRequest::bonafide(student.id).with_purpose("passport"))
        .unwrap();
    let document = issued.document.unwrap();
    assert_eq!(document.content_type, "text/plain; charset=utf-8");
    (document.file_name, String::from_utf8(document.bytes).unwrap())
}

#[test]
fn female_student_in_third_semester() {
    let (file_name, text) = issue_text(Gender::Female, Some(3));
    assert_eq!(file_name, "bonafide_UR-207_2024-03-01.txt");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Office of the Principal");
    assert_eq!(lines[1], "Sample Degree College");
    assert_eq!(lines[2], "Phone 0000");
    assert!(text.contains("BONAFIDE CERTIFICATE"));
    assert!(text.contains("This is certified that Student 207\n"));
    assert!(text.contains("D.O Parent of Student 207\n"));
    assert!(text.contains("UG 3rd Semester in this college for the\n"));
    assert!(text.contains("Year 2023-24\n"));
    assert!(text.contains("Batch 2022\n"));
    assert!(text.contains("Class Roll.No. 207\n"));
    assert!(text.contains("Registration No. UR-207\n"));
    assert!(text.contains("Purpose: passport\n"));
    assert!(text.contains("Dated: 01-03-2024"));
    assert!(text.contains("Dated: 01/03/2024\n"));
    assert_eq!(lines.last().copied(), Some("Principal, Sample Degree College"));
}

#[test]
fn male_student_without_enrollment_uses_placeholder() {
    let (_, text) = issue_text(Gender::Male, None);
    assert!(text.contains("S.O Parent of Student 207\n"));
    assert!(text.contains("UG _____________ Semester"));
    assert!(text.contains("Year 2024\n"));
}

#[test]
fn rerender_is_byte_identical() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "301", Gender::Male, "2021");
    let engine = IssuanceEngine::new(
        &storage,
        &RegistrarConfig::default(),
        Arc::new(FixedClock::new(date(2024, 3, 1))),
        Arc::new(TextBonafideRenderer::default()),
    );
    let issued = engine.issue(&IssueRequest::bonafide(student.id)).unwrap();
    let again = engine
        .render_for_download(issued.certificate().id, CertificateType::Bonafide)
        .unwrap();
    assert_eq!(issued.document.unwrap(), again);
}

#[test]
fn non_bonafide_snapshot_is_refused() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let student = admit_student(&storage, "301", Gender::Male, "2021");
    let engine = IssuanceEngine::new(
        &storage,
        &RegistrarConfig::default(),
        Arc::new(FixedClock::new(date(2024, 3, 1))),
        Arc::new(TextBonafideRenderer::default()),
    );
    let issued = engine
        .issue(&IssueRequest::new(student.id, CertificateType::Degree))
        .unwrap();
    let snapshot = engine
        .fetch_for_download(issued.certificate().id, CertificateType::Degree)
        .unwrap();
    assert!(TextBonafideRenderer::default().render(&snapshot).is_err());
}
