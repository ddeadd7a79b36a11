//! File-backed databases: migrations, pragmas, read pool, cross-connection locking.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::NaiveDate;
use registrar_core::config::StorageConfig;
use registrar_core::errors::{IssuanceError, RegistrarResult};
use registrar_core::models::{CertificateType, Gender, NewCertificate};
use registrar_core::traits::IRegistrarStorage;
use registrar_storage::connection::pragmas::{foreign_keys_enabled, verify_wal_mode};
use registrar_storage::migrations::{current_version, LATEST_VERSION};
use registrar_storage::StorageEngine;
use test_fixtures::{admit_student, date};

#[test]
fn fresh_file_is_migrated_with_wal_and_foreign_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");
    let storage = StorageEngine::open(&path, 2).unwrap();
    assert_eq!(storage.database().reader_count(), 2);
    assert_eq!(StorageEngine::open_in_memory().unwrap().database().reader_count(), 0);

    storage
        .database()
        .with_writer(|conn| {
            assert_eq!(current_version(conn)?, LATEST_VERSION);
            assert!(verify_wal_mode(conn)?);
            assert!(foreign_keys_enabled(conn)?);
            Ok(())
        })
        .unwrap();
}

#[test]
fn from_config_resolves_relative_path_against_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: Some("data/records.db".to_string()),
        read_pool_size: Some(3),
    };
    std::fs::create_dir(dir.path().join("data")).unwrap();

    let storage = StorageEngine::from_config(&config, dir.path()).unwrap();
    assert_eq!(
        storage.database().path(),
        Some(dir.path().join("data/records.db").as_path())
    );
    assert_eq!(storage.database().reader_count(), 3);
    assert!(dir.path().join("data/records.db").exists());
}

#[test]
fn data_survives_reopen_and_is_visible_to_readers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");

    let id = {
        let storage = StorageEngine::open(&path, 2).unwrap();
        let student = admit_student(&storage, "101", Gender::Female, "2023");
        // Read pool sees the committed write.
        assert!(storage.get_student(student.id).unwrap().is_some());
        storage.database().checkpoint().unwrap();
        student.id
    };

    let reopened = StorageEngine::open(&path, 2).unwrap();
    let student = reopened.get_student(id).unwrap().expect("persisted");
    assert_eq!(student.details.class_roll_no, "101");
}

/// Two engines on one file model two processes. The gate runs inside
/// BEGIN IMMEDIATE, so the second writer waits, then sees the first
/// certificate and refuses.
#[test]
fn concurrent_issuance_across_connections_admits_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registrar.db");
    let first = Arc::new(StorageEngine::open(&path, 1).unwrap());
    let second = Arc::new(StorageEngine::open(&path, 1).unwrap());
    let student_id = admit_student(first.as_ref(), "101", Gender::Male, "2022").id;

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = [first, second]
        .into_iter()
        .map(|storage| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let certificate = NewCertificate {
                    student_id,
                    certificate_type: CertificateType::Bonafide,
                    certificate_number: None,
                    issue_date: date(2024, 3, 1),
                    purpose: None,
                    remarks: None,
                    issued_by: None,
                };
                let gate = |last: Option<NaiveDate>| -> RegistrarResult<()> {
                    match last {
                        None => Ok(()),
                        Some(last_issued) => Err(IssuanceError::Ineligible {
                            certificate_type: CertificateType::Bonafide,
                            last_issued,
                            remaining_days: 180,
                        }
                        .into()),
                    }
                };
                barrier.wait();
                storage.record_certificate(&certificate, &gate)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let loser = results.into_iter().find_map(Result::err).expect("one refusal");
    assert!(loser.is_not_eligible());
}
