//! StorageEngine: owns the DatabaseManager and implements IRegistrarStorage.

use std::path::Path;

use chrono::{NaiveDate, Utc};

use registrar_core::config::StorageConfig;
use registrar_core::errors::{IssuanceError, RegistrarError, RegistrarResult, StorageError};
use registrar_core::models::{
    AcademicSession, CertificateId, CertificateRecord, CertificateSnapshot, CertificateType,
    CourseType, EnrollmentFact, EnrollmentId, EnrollmentRecord, NewCertificate, NewEnrollment,
    NewSession, NewSubject, Semester, SemesterId, SessionId, SlotCategory, SlotMap, Student,
    StudentDetails, StudentFact, StudentId, Subject, SubjectId,
};
use registrar_core::traits::{IRegistrarStorage, IssuanceGate};

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::{catalog, certificates, enrollments, facts, students};

/// The main storage engine. Every write goes through the single writer;
/// reads use the pool when the database is file-backed.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, read_pool_size: usize) -> RegistrarResult<Self> {
        let db = DatabaseManager::open(path, read_pool_size)?;
        tracing::debug!(path = %path.display(), read_pool_size, "opened registrar database");
        Ok(Self { db })
    }

    /// Open using the storage section of the resolved config.
    pub fn from_config(config: &StorageConfig, root: &Path) -> RegistrarResult<Self> {
        Self::open(
            &config.effective_db_path(root),
            config.effective_read_pool_size(),
        )
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> RegistrarResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }

    fn updated_or_missing(
        rows: usize,
        entity: &'static str,
        key: impl ToString,
    ) -> RegistrarResult<()> {
        if rows == 0 {
            Err(RegistrarError::not_found(entity, key))
        } else {
            Ok(())
        }
    }

    /// Run `f` against an existing enrollment inside one transaction and
    /// return the record as it stands afterwards.
    fn mutate_enrollment<F>(&self, id: EnrollmentId, f: F) -> RegistrarResult<EnrollmentRecord>
    where
        F: FnOnce(&rusqlite::Connection) -> RegistrarResult<()>,
    {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let touched = enrollments::touch(tx, id, Utc::now())?;
                Self::updated_or_missing(touched, "enrollment", id)?;
                f(tx)?;
                enrollments::get_enrollment(tx, id)?
                    .ok_or_else(|| RegistrarError::not_found("enrollment", id))
            })
        })
    }
}

impl IRegistrarStorage for StorageEngine {
    // ─── Students ───

    fn create_student(&self, details: &StudentDetails) -> RegistrarResult<Student> {
        self.db.with_writer(|conn| {
            let id = students::insert_student(conn, details, Utc::now())?;
            students::get_student(conn, id)?.ok_or_else(|| RegistrarError::not_found("student", id))
        })
    }

    fn get_student(&self, id: StudentId) -> RegistrarResult<Option<Student>> {
        self.db.with_reader(|conn| students::get_student(conn, id))
    }

    fn find_students_by_identifier(&self, identifier: &str) -> RegistrarResult<Vec<Student>> {
        self.db
            .with_reader(|conn| students::find_by_identifier(conn, identifier))
    }

    fn list_students(&self, active_only: bool) -> RegistrarResult<Vec<Student>> {
        self.db
            .with_reader(|conn| students::list_students(conn, active_only))
    }

    fn set_student_active(&self, id: StudentId, is_active: bool) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| students::set_active(conn, id, is_active, Utc::now()))?;
        Self::updated_or_missing(rows, "student", id)
    }

    fn delete_student(&self, id: StudentId) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| students::delete_student(conn, id))?;
        Self::updated_or_missing(rows, "student", id)
    }

    // ─── Catalog: sessions ───

    fn create_session(&self, session: &NewSession) -> RegistrarResult<AcademicSession> {
        self.db.with_writer(|conn| {
            let id = catalog::insert_session(conn, session)?;
            catalog::get_session(conn, id)?.ok_or_else(|| RegistrarError::not_found("session", id))
        })
    }

    fn get_session(&self, id: SessionId) -> RegistrarResult<Option<AcademicSession>> {
        self.db.with_reader(|conn| catalog::get_session(conn, id))
    }

    fn get_session_by_code(&self, code: &str) -> RegistrarResult<Option<AcademicSession>> {
        self.db
            .with_reader(|conn| catalog::get_session_by_code(conn, code))
    }

    fn list_sessions(&self) -> RegistrarResult<Vec<AcademicSession>> {
        self.db.with_reader(catalog::list_sessions)
    }

    fn set_session_current(
        &self,
        id: SessionId,
        is_current: bool,
        exclusive: bool,
    ) -> RegistrarResult<()> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let rows = catalog::set_session_current(tx, id, is_current)?;
                Self::updated_or_missing(rows, "session", id)?;
                if is_current && exclusive {
                    catalog::clear_other_current(tx, id)?;
                }
                Ok(())
            })
        })
    }

    fn current_sessions(&self) -> RegistrarResult<Vec<AcademicSession>> {
        self.db.with_reader(catalog::current_sessions)
    }

    fn delete_session(&self, id: SessionId) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| catalog::delete_session(conn, id))?;
        Self::updated_or_missing(rows, "session", id)
    }

    // ─── Catalog: semesters ───

    fn create_semester(&self, number: u32, name: &str) -> RegistrarResult<Semester> {
        self.db.with_writer(|conn| {
            let id = catalog::insert_semester(conn, number, name)?;
            catalog::get_semester(conn, id)?
                .ok_or_else(|| RegistrarError::not_found("semester", id))
        })
    }

    fn get_semester(&self, id: SemesterId) -> RegistrarResult<Option<Semester>> {
        self.db.with_reader(|conn| catalog::get_semester(conn, id))
    }

    fn get_semester_by_number(&self, number: u32) -> RegistrarResult<Option<Semester>> {
        self.db
            .with_reader(|conn| catalog::get_semester_by_number(conn, number))
    }

    fn list_semesters(&self) -> RegistrarResult<Vec<Semester>> {
        self.db.with_reader(catalog::list_semesters)
    }

    fn delete_semester(&self, id: SemesterId) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| catalog::delete_semester(conn, id))?;
        Self::updated_or_missing(rows, "semester", id)
    }

    // ─── Catalog: subjects ───

    fn create_subject(&self, subject: &NewSubject) -> RegistrarResult<Subject> {
        self.db.with_writer(|conn| {
            let id = catalog::insert_subject(conn, subject)?;
            catalog::get_subject(conn, id)?.ok_or_else(|| RegistrarError::not_found("subject", id))
        })
    }

    fn get_subject(&self, id: SubjectId) -> RegistrarResult<Option<Subject>> {
        self.db.with_reader(|conn| catalog::get_subject(conn, id))
    }

    fn get_subject_by_code(&self, code: &str) -> RegistrarResult<Option<Subject>> {
        self.db
            .with_reader(|conn| catalog::get_subject_by_code(conn, code))
    }

    fn list_subjects(&self, course_type: Option<CourseType>) -> RegistrarResult<Vec<Subject>> {
        self.db
            .with_reader(|conn| catalog::list_subjects(conn, course_type))
    }

    fn delete_subject(&self, id: SubjectId) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| catalog::delete_subject(conn, id))?;
        Self::updated_or_missing(rows, "subject", id)
    }

    // ─── Enrollment ledger ───

    fn insert_enrollment(&self, enrollment: &NewEnrollment) -> RegistrarResult<EnrollmentRecord> {
        self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let id = enrollments::insert_enrollment(tx, enrollment, Utc::now())?;
                enrollments::get_enrollment(tx, id)?
                    .ok_or_else(|| RegistrarError::not_found("enrollment", id))
            })
        })
    }

    fn get_enrollment(&self, id: EnrollmentId) -> RegistrarResult<Option<EnrollmentRecord>> {
        self.db
            .with_reader(|conn| enrollments::get_enrollment(conn, id))
    }

    fn find_enrollment(
        &self,
        student_id: StudentId,
        session_id: SessionId,
        semester_id: SemesterId,
    ) -> RegistrarResult<Option<EnrollmentRecord>> {
        self.db.with_reader(|conn| {
            enrollments::find_enrollment(conn, student_id, session_id, semester_id)
        })
    }

    fn replace_enrollment_slots(
        &self,
        id: EnrollmentId,
        slots: &SlotMap<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.mutate_enrollment(id, |tx| enrollments::replace_slots(tx, id, slots))
    }

    fn replace_enrollment(
        &self,
        id: EnrollmentId,
        slots: &SlotMap<SubjectId>,
        is_enrolled: bool,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.mutate_enrollment(id, |tx| {
            enrollments::replace_slots(tx, id, slots)?;
            enrollments::set_enrolled(tx, id, is_enrolled, Utc::now()).map(|_| ())
        })
    }

    fn set_enrollment_slot(
        &self,
        id: EnrollmentId,
        slot: SlotCategory,
        subject_id: Option<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.mutate_enrollment(id, |tx| enrollments::write_slot(tx, id, slot, subject_id))
    }

    fn set_enrolled(
        &self,
        id: EnrollmentId,
        is_enrolled: bool,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.mutate_enrollment(id, |tx| {
            enrollments::set_enrolled(tx, id, is_enrolled, Utc::now()).map(|_| ())
        })
    }

    fn delete_enrollment(&self, id: EnrollmentId) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| enrollments::delete_enrollment(conn, id))?;
        Self::updated_or_missing(rows, "enrollment", id)
    }

    fn list_enrollments(&self, student_id: StudentId) -> RegistrarResult<Vec<EnrollmentRecord>> {
        self.db
            .with_reader(|conn| enrollments::list_for_student(conn, student_id))
    }

    fn latest_enrollment(&self, student_id: StudentId) -> RegistrarResult<Option<EnrollmentRecord>> {
        self.db
            .with_reader(|conn| enrollments::latest_for_student(conn, student_id))
    }

    // ─── Certificates ───

    fn record_certificate(
        &self,
        certificate: &NewCertificate,
        gate: IssuanceGate<'_>,
    ) -> RegistrarResult<CertificateSnapshot> {
        let result = self.db.with_writer(|conn| {
            with_immediate_transaction(conn, |tx| {
                let student = students::get_student(tx, certificate.student_id)?
                    .ok_or_else(|| RegistrarError::not_found("student", certificate.student_id))?;
                let last = certificates::last_issue_date(
                    tx,
                    student.id,
                    certificate.certificate_type,
                )?;
                gate(last)?;

                let enrollment = enrollments::latest_for_student(tx, student.id)?;
                let id = certificates::insert_certificate(
                    tx,
                    certificate,
                    enrollment.as_ref().map(|e| e.id),
                    Utc::now(),
                )?;
                let record = certificates::get_certificate(tx, id)?
                    .ok_or_else(|| RegistrarError::not_found("certificate", id))?;
                Ok(CertificateSnapshot {
                    student,
                    certificate: record,
                    enrollment,
                })
            })
        });

        match result {
            // Another connection held the write lock past the busy timeout.
            Err(RegistrarError::Storage(StorageError::Busy { message })) => {
                tracing::warn!(
                    student_id = certificate.student_id,
                    certificate_type = %certificate.certificate_type,
                    %message,
                    "certificate write lost the lock race"
                );
                Err(IssuanceError::Conflict {
                    certificate_type: certificate.certificate_type,
                    student_id: certificate.student_id,
                }
                .into())
            }
            other => other,
        }
    }

    fn get_certificate(&self, id: CertificateId) -> RegistrarResult<Option<CertificateRecord>> {
        self.db
            .with_reader(|conn| certificates::get_certificate(conn, id))
    }

    fn certificate_snapshot(
        &self,
        id: CertificateId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<Option<CertificateSnapshot>> {
        self.db.with_reader(|conn| {
            let certificate = match certificates::get_certificate(conn, id)? {
                Some(c) if c.certificate_type == certificate_type => c,
                _ => return Ok(None),
            };
            let student = students::get_student(conn, certificate.student_id)?
                .ok_or_else(|| RegistrarError::not_found("student", certificate.student_id))?;
            let enrollment = match certificate.enrollment_id {
                Some(enrollment_id) => enrollments::get_enrollment(conn, enrollment_id)?,
                None => None,
            };
            Ok(Some(CertificateSnapshot {
                student,
                certificate,
                enrollment,
            }))
        })
    }

    fn list_certificates(
        &self,
        student_id: StudentId,
        certificate_type: Option<CertificateType>,
    ) -> RegistrarResult<Vec<CertificateRecord>> {
        self.db.with_reader(|conn| {
            certificates::list_for_student(conn, student_id, certificate_type)
        })
    }

    fn last_issue_date(
        &self,
        student_id: StudentId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<Option<NaiveDate>> {
        self.db.with_reader(|conn| {
            certificates::last_issue_date(conn, student_id, certificate_type)
        })
    }

    fn assign_certificate_number(&self, id: CertificateId, number: &str) -> RegistrarResult<()> {
        let rows = self
            .db
            .with_writer(|conn| certificates::set_certificate_number(conn, id, number))?;
        Self::updated_or_missing(rows, "certificate", id)
    }

    // ─── Read-side facts ───

    fn active_student_facts(&self) -> RegistrarResult<Vec<StudentFact>> {
        self.db.with_reader(facts::active_student_facts)
    }

    fn enrollment_facts(&self, semester_number: Option<u32>) -> RegistrarResult<Vec<EnrollmentFact>> {
        self.db
            .with_reader(|conn| facts::enrollment_facts(conn, semester_number))
    }
}
