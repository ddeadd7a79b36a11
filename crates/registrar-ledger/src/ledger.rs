//! The enrollment ledger: one record per (student, session, semester).
//!
//! Slot/course-type consistency is enforced here, at the data-entry
//! boundary. Storage only guarantees the triple's uniqueness.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use registrar_core::errors::{RegistrarError, RegistrarResult, ValidationError};
use registrar_core::models::{
    EnrollmentId, EnrollmentRecord, NewEnrollment, SlotCategory, SlotMap, StudentId, SubjectId,
};
use registrar_core::traits::IRegistrarStorage;

/// What `upsert_enrollment` does when the triple already has a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertMode {
    /// Fail with `DuplicateEnrollment`.
    #[default]
    CreateOnly,
    /// Replace the existing record's slots and enrolled flag.
    CreateOrReplace,
}

pub struct EnrollmentLedger<'a> {
    storage: &'a dyn IRegistrarStorage,
}

impl<'a> EnrollmentLedger<'a> {
    pub fn new(storage: &'a dyn IRegistrarStorage) -> Self {
        Self { storage }
    }

    /// Check that every filled slot names an existing subject of the
    /// slot's course type.
    pub fn validate_slots(&self, slots: &SlotMap<SubjectId>) -> RegistrarResult<()> {
        for (slot, subject_id) in slots.filled() {
            self.validate_slot(slot, *subject_id)?;
        }
        Ok(())
    }

    fn validate_slot(&self, slot: SlotCategory, subject_id: SubjectId) -> RegistrarResult<()> {
        let subject = self
            .storage
            .get_subject(subject_id)?
            .ok_or_else(|| RegistrarError::not_found("subject", subject_id))?;
        if !slot.accepts(subject.course_type) {
            return Err(ValidationError::SlotMismatch {
                slot,
                subject_code: subject.subject_code,
                actual: subject.course_type,
            }
            .into());
        }
        Ok(())
    }

    /// Create the record for (student, session, semester), or with
    /// `CreateOrReplace` overwrite the slots and enrolled flag of the
    /// existing one.
    pub fn upsert_enrollment(
        &self,
        enrollment: &NewEnrollment,
        mode: UpsertMode,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.storage
            .get_student(enrollment.student_id)?
            .ok_or_else(|| RegistrarError::not_found("student", enrollment.student_id))?;
        self.storage
            .get_session(enrollment.session_id)?
            .ok_or_else(|| RegistrarError::not_found("session", enrollment.session_id))?;
        self.storage
            .get_semester(enrollment.semester_id)?
            .ok_or_else(|| RegistrarError::not_found("semester", enrollment.semester_id))?;
        self.validate_slots(&enrollment.slots)?;

        let existing = self.storage.find_enrollment(
            enrollment.student_id,
            enrollment.session_id,
            enrollment.semester_id,
        )?;

        match (existing, mode) {
            (None, _) => match self.storage.insert_enrollment(enrollment) {
                Ok(record) => {
                    info!(
                        enrollment_id = record.id,
                        student_id = record.student_id,
                        session = %record.session.session_code,
                        semester = record.semester.semester_number,
                        slots = record.slots.filled_count(),
                        "enrollment created"
                    );
                    Ok(record)
                }
                // Lost a race with a concurrent insert of the same triple.
                Err(RegistrarError::Validation(ValidationError::DuplicateEnrollment { .. }))
                    if mode == UpsertMode::CreateOrReplace =>
                {
                    let record = self
                        .storage
                        .find_enrollment(
                            enrollment.student_id,
                            enrollment.session_id,
                            enrollment.semester_id,
                        )?
                        .ok_or_else(|| {
                            RegistrarError::not_found("enrollment", enrollment.student_id)
                        })?;
                    self.replace(record.id, enrollment)
                }
                Err(e) => Err(e),
            },
            (Some(_), UpsertMode::CreateOnly) => Err(ValidationError::DuplicateEnrollment {
                student_id: enrollment.student_id,
                session_id: enrollment.session_id,
                semester_id: enrollment.semester_id,
            }
            .into()),
            (Some(record), UpsertMode::CreateOrReplace) => self.replace(record.id, enrollment),
        }
    }

    fn replace(
        &self,
        id: EnrollmentId,
        enrollment: &NewEnrollment,
    ) -> RegistrarResult<EnrollmentRecord> {
        let record = self
            .storage
            .replace_enrollment(id, &enrollment.slots, enrollment.is_enrolled)?;
        info!(
            enrollment_id = id,
            student_id = record.student_id,
            slots = record.slots.filled_count(),
            "enrollment replaced"
        );
        Ok(record)
    }

    /// Replace all slot assignments of an existing record.
    pub fn update_slots(
        &self,
        id: EnrollmentId,
        slots: &SlotMap<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord> {
        self.validate_slots(slots)?;
        let record = self.storage.replace_enrollment_slots(id, slots)?;
        info!(enrollment_id = id, slots = record.slots.filled_count(), "enrollment slots updated");
        Ok(record)
    }

    /// Set or clear a single slot, leaving the other seven untouched.
    pub fn set_slot(
        &self,
        id: EnrollmentId,
        slot: SlotCategory,
        subject_id: Option<SubjectId>,
    ) -> RegistrarResult<EnrollmentRecord> {
        if let Some(subject_id) = subject_id {
            self.validate_slot(slot, subject_id)?;
        }
        let record = self.storage.set_enrollment_slot(id, slot, subject_id)?;
        debug!(enrollment_id = id, %slot, ?subject_id, "enrollment slot set");
        Ok(record)
    }

    pub fn set_enrolled(&self, id: EnrollmentId, is_enrolled: bool) -> RegistrarResult<EnrollmentRecord> {
        let record = self.storage.set_enrolled(id, is_enrolled)?;
        info!(enrollment_id = id, is_enrolled, "enrollment status changed");
        Ok(record)
    }

    pub fn get(&self, id: EnrollmentId) -> RegistrarResult<EnrollmentRecord> {
        self.storage
            .get_enrollment(id)?
            .ok_or_else(|| RegistrarError::not_found("enrollment", id))
    }

    /// Certificates issued against the record keep a null snapshot.
    pub fn delete(&self, id: EnrollmentId) -> RegistrarResult<()> {
        self.storage.delete_enrollment(id)?;
        info!(enrollment_id = id, "enrollment deleted");
        Ok(())
    }

    /// The record whose session started most recently. Ties go to the
    /// higher semester number, then the newer record.
    pub fn latest_enrollment(&self, student_id: StudentId) -> RegistrarResult<Option<EnrollmentRecord>> {
        self.storage.latest_enrollment(student_id)
    }

    /// Every record for the student, in `latest_enrollment` order.
    pub fn list_enrollments(&self, student_id: StudentId) -> RegistrarResult<Vec<EnrollmentRecord>> {
        self.storage
            .get_student(student_id)?
            .ok_or_else(|| RegistrarError::not_found("student", student_id))?;
        self.storage.list_enrollments(student_id)
    }
}
