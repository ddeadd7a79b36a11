//! Enrollment ledger rows: one per (student, session, semester).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{AcademicSession, Semester, SemesterId, SessionId, Subject, SubjectId};
use super::slots::{SlotCategory, SlotMap};
use super::student::StudentId;

pub type EnrollmentId = i64;

/// A stored enrollment with its session, semester, and slot subjects resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub session: AcademicSession,
    pub semester: Semester,
    pub slots: SlotMap<Subject>,
    pub is_enrolled: bool,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EnrollmentRecord {
    pub fn subject(&self, slot: SlotCategory) -> Option<&Subject> {
        self.slots.get(slot)
    }

    /// Slot assignments as subject ids, the shape writes take.
    pub fn slot_ids(&self) -> SlotMap<SubjectId> {
        self.slots.map(|s| s.id)
    }
}

/// Input for creating an enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEnrollment {
    pub student_id: StudentId,
    pub session_id: SessionId,
    pub semester_id: SemesterId,
    #[serde(default)]
    pub slots: SlotMap<SubjectId>,
    pub is_enrolled: bool,
    pub enrollment_date: NaiveDate,
}

impl NewEnrollment {
    pub fn new(
        student_id: StudentId,
        session_id: SessionId,
        semester_id: SemesterId,
        enrollment_date: NaiveDate,
    ) -> Self {
        Self {
            student_id,
            session_id,
            semester_id,
            slots: SlotMap::empty(),
            is_enrolled: true,
            enrollment_date,
        }
    }

    pub fn with_slot(mut self, slot: SlotCategory, subject_id: SubjectId) -> Self {
        self.slots.set(slot, Some(subject_id));
        self
    }

    pub fn enrolled(mut self, is_enrolled: bool) -> Self {
        self.is_enrolled = is_enrolled;
        self
    }
}
