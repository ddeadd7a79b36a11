//! Catalog: sessions, semesters, subjects.

use registrar_core::errors::{RegistrarError, RegistrarResult, ValidationError};
use registrar_core::models::{
    AcademicSession, CourseType, NewSession, NewSubject, Semester, SemesterId, SessionId,
    Subject, SubjectId,
};
use registrar_core::traits::IRegistrarStorage;
use tracing::info;

/// Reference data lookups and maintenance.
pub struct Catalog<'a> {
    storage: &'a dyn IRegistrarStorage,
}

impl<'a> Catalog<'a> {
    pub fn new(storage: &'a dyn IRegistrarStorage) -> Self {
        Self { storage }
    }

    // ─── Sessions ───

    pub fn create_session(&self, session: &NewSession) -> RegistrarResult<AcademicSession> {
        if session.session_code.trim().is_empty() {
            return Err(ValidationError::invalid("session_code", "must not be blank").into());
        }
        if session.end_date <= session.start_date {
            return Err(ValidationError::invalid(
                "end_date",
                format!(
                    "{} is not after start date {}",
                    session.end_date, session.start_date
                ),
            )
            .into());
        }
        let created = self.storage.create_session(session)?;
        info!(session_id = created.id, code = %created.session_code, "session created");
        Ok(created)
    }

    pub fn session(&self, id: SessionId) -> RegistrarResult<AcademicSession> {
        self.storage
            .get_session(id)?
            .ok_or_else(|| RegistrarError::not_found("session", id))
    }

    pub fn session_by_code(&self, code: &str) -> RegistrarResult<AcademicSession> {
        self.storage
            .get_session_by_code(code)?
            .ok_or_else(|| RegistrarError::not_found("session", code))
    }

    /// Newest start date first.
    pub fn sessions(&self) -> RegistrarResult<Vec<AcademicSession>> {
        self.storage.list_sessions()
    }

    /// Flag a session as current. With `exclusive`, every other session
    /// loses the flag in the same transaction.
    pub fn set_current(&self, id: SessionId, exclusive: bool) -> RegistrarResult<()> {
        self.storage.set_session_current(id, true, exclusive)?;
        info!(session_id = id, exclusive, "session marked current");
        Ok(())
    }

    pub fn clear_current(&self, id: SessionId) -> RegistrarResult<()> {
        self.storage.set_session_current(id, false, false)
    }

    /// Every session carrying the current flag. More than one is possible
    /// when the flag was set non-exclusively; callers decide what that means.
    pub fn current_sessions(&self) -> RegistrarResult<Vec<AcademicSession>> {
        self.storage.current_sessions()
    }

    pub fn delete_session(&self, id: SessionId) -> RegistrarResult<()> {
        self.storage.delete_session(id)?;
        info!(session_id = id, "session deleted");
        Ok(())
    }

    // ─── Semesters ───

    pub fn create_semester(&self, number: u32, name: &str) -> RegistrarResult<Semester> {
        if number == 0 {
            return Err(ValidationError::invalid("semester_number", "must start at 1").into());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::invalid("semester_name", "must not be blank").into());
        }
        self.storage.create_semester(number, name.trim())
    }

    pub fn semester(&self, id: SemesterId) -> RegistrarResult<Semester> {
        self.storage
            .get_semester(id)?
            .ok_or_else(|| RegistrarError::not_found("semester", id))
    }

    pub fn semester_by_number(&self, number: u32) -> RegistrarResult<Semester> {
        self.storage
            .get_semester_by_number(number)?
            .ok_or_else(|| RegistrarError::not_found("semester", number))
    }

    pub fn semesters(&self) -> RegistrarResult<Vec<Semester>> {
        self.storage.list_semesters()
    }

    pub fn delete_semester(&self, id: SemesterId) -> RegistrarResult<()> {
        self.storage.delete_semester(id)
    }

    // ─── Subjects ───

    pub fn create_subject(&self, subject: &NewSubject) -> RegistrarResult<Subject> {
        if subject.subject_code.trim().is_empty() {
            return Err(ValidationError::invalid("subject_code", "must not be blank").into());
        }
        if subject.subject_name.trim().is_empty() {
            return Err(ValidationError::invalid("subject_name", "must not be blank").into());
        }
        self.storage.create_subject(subject)
    }

    pub fn subject(&self, id: SubjectId) -> RegistrarResult<Subject> {
        self.storage
            .get_subject(id)?
            .ok_or_else(|| RegistrarError::not_found("subject", id))
    }

    pub fn subject_by_code(&self, code: &str) -> RegistrarResult<Subject> {
        self.storage
            .get_subject_by_code(code)?
            .ok_or_else(|| RegistrarError::not_found("subject", code))
    }

    /// Ordered by course type, then subject name.
    pub fn subjects(&self, course_type: Option<CourseType>) -> RegistrarResult<Vec<Subject>> {
        self.storage.list_subjects(course_type)
    }

    /// Enrollment slots holding the subject become empty.
    pub fn delete_subject(&self, id: SubjectId) -> RegistrarResult<()> {
        self.storage.delete_subject(id)?;
        info!(subject_id = id, "subject deleted");
        Ok(())
    }
}
