//! Storage seam shared by every service crate. `StorageEngine` in
//! registrar-storage is the SQLite implementation.

use chrono::NaiveDate;

use crate::errors::RegistrarResult;
use crate::models::{
    AcademicSession, CertificateId, CertificateRecord, CertificateSnapshot, CertificateType,
    CourseType, EnrollmentFact, EnrollmentId, EnrollmentRecord, NewCertificate, NewEnrollment,
    NewSession, NewSubject, Semester, SemesterId, SessionId, SlotCategory, SlotMap, Student,
    StudentDetails, StudentFact, StudentId, Subject, SubjectId,
};

/// Decides, inside the issuing transaction, whether a certificate may be
/// written given the most recent issue date of the same type.
pub type IssuanceGate<'a> = &'a dyn Fn(Option<NaiveDate>) -> RegistrarResult<()>;

/// Students + catalog + enrollment ledger + certificates + read-side facts.
pub trait IRegistrarStorage: Send + Sync {
    // --- Students ---
    fn create_student(&self, details: &StudentDetails) -> RegistrarResult<Student>;
    fn get_student(&self, id: StudentId) -> RegistrarResult<Option<Student>>;
    fn find_students_by_identifier(&self, identifier: &str) -> RegistrarResult<Vec<Student>>;
    fn list_students(&self, active_only: bool) -> RegistrarResult<Vec<Student>>;
    fn set_student_active(&self, id: StudentId, is_active: bool) -> RegistrarResult<()>;
    fn delete_student(&self, id: StudentId) -> RegistrarResult<()>;

    // --- Catalog: sessions ---
    fn create_session(&self, session: &NewSession) -> RegistrarResult<AcademicSession>;
    fn get_session(&self, id: SessionId) -> RegistrarResult<Option<AcademicSession>>;
    fn get_session_by_code(&self, code: &str) -> RegistrarResult<Option<AcademicSession>>;
    fn list_sessions(&self) -> RegistrarResult<Vec<AcademicSession>>;
    fn set_session_current(
        &self,
        id: SessionId,
        is_current: bool,
        exclusive: bool,
    ) -> RegistrarResult<()>;
    fn current_sessions(&self) -> RegistrarResult<Vec<AcademicSession>>;
    fn delete_session(&self, id: SessionId) -> RegistrarResult<()>;

    // --- Catalog: semesters ---
    fn create_semester(&self, number: u32, name: &str) -> RegistrarResult<Semester>;
    fn get_semester(&self, id: SemesterId) -> RegistrarResult<Option<Semester>>;
    fn get_semester_by_number(&self, number: u32) -> RegistrarResult<Option<Semester>>;
    fn list_semesters(&self) -> RegistrarResult<Vec<Semester>>;
    fn delete_semester(&self, id: SemesterId) -> RegistrarResult<()>;

    // --- Catalog: subjects ---
    fn create_subject(&self, subject: &NewSubject) -> RegistrarResult<Subject>;
    fn get_subject(&self, id: SubjectId) -> RegistrarResult<Option<Subject>>;
    fn get_subject_by_code(&self, code: &str) -> RegistrarResult<Option<Subject>>;
    fn list_subjects(&self, course_type: Option<CourseType>) -> RegistrarResult<Vec<Subject>>;
    fn delete_subject(&self, id: SubjectId) -> RegistrarResult<()>;

    // --- Enrollment ledger ---
    fn insert_enrollment(&self, enrollment: &NewEnrollment) -> RegistrarResult<EnrollmentRecord>;
    fn get_enrollment(&self, id: EnrollmentId) -> RegistrarResult<Option<EnrollmentRecord>>;
    fn find_enrollment(
        &self,
        student_id: StudentId,
        session_id: SessionId,
        semester_id: SemesterId,
    ) -> RegistrarResult<Option<EnrollmentRecord>>;
    fn replace_enrollment_slots(
        &self,
        id: EnrollmentId,
        slots: &SlotMap<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord>;
    /// Overwrite every slot and the enrolled flag in one transaction.
    fn replace_enrollment(
        &self,
        id: EnrollmentId,
        slots: &SlotMap<SubjectId>,
        is_enrolled: bool,
    ) -> RegistrarResult<EnrollmentRecord>;
    fn set_enrollment_slot(
        &self,
        id: EnrollmentId,
        slot: SlotCategory,
        subject_id: Option<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord>;
    fn set_enrolled(&self, id: EnrollmentId, is_enrolled: bool)
        -> RegistrarResult<EnrollmentRecord>;
    fn delete_enrollment(&self, id: EnrollmentId) -> RegistrarResult<()>;
    /// Newest session first; ties broken by semester number, then id, both descending.
    fn list_enrollments(&self, student_id: StudentId) -> RegistrarResult<Vec<EnrollmentRecord>>;
    fn latest_enrollment(&self, student_id: StudentId)
        -> RegistrarResult<Option<EnrollmentRecord>>;

    // --- Certificates ---
    /// Atomically: load the student, read the last issue date of the same
    /// type, run `gate`, snapshot the latest enrollment, insert the row.
    /// Nothing is written when `gate` refuses.
    fn record_certificate(
        &self,
        certificate: &NewCertificate,
        gate: IssuanceGate<'_>,
    ) -> RegistrarResult<CertificateSnapshot>;
    fn get_certificate(&self, id: CertificateId) -> RegistrarResult<Option<CertificateRecord>>;
    fn certificate_snapshot(
        &self,
        id: CertificateId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<Option<CertificateSnapshot>>;
    /// Newest issue date first.
    fn list_certificates(
        &self,
        student_id: StudentId,
        certificate_type: Option<CertificateType>,
    ) -> RegistrarResult<Vec<CertificateRecord>>;
    fn last_issue_date(
        &self,
        student_id: StudentId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<Option<NaiveDate>>;
    fn assign_certificate_number(&self, id: CertificateId, number: &str) -> RegistrarResult<()>;

    // --- Read-side facts ---
    fn active_student_facts(&self) -> RegistrarResult<Vec<StudentFact>>;
    /// Enrolled records of active students, optionally for one semester number.
    fn enrollment_facts(&self, semester_number: Option<u32>)
        -> RegistrarResult<Vec<EnrollmentFact>>;
}
