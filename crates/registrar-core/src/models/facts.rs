//! Flattened read-side rows consumed by the statistics layer.

use serde::{Deserialize, Serialize};

use super::catalog::SubjectId;
use super::enrollment::EnrollmentId;
use super::slots::SlotMap;
use super::student::Gender;

/// One active student, reduced to what batch reports group on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentFact {
    pub gender: Gender,
    pub batch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    pub id: SubjectId,
    pub subject_code: String,
    pub subject_name: String,
}

/// One enrolled record of an active student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentFact {
    pub enrollment_id: EnrollmentId,
    pub gender: Gender,
    pub semester_number: u32,
    pub semester_name: String,
    pub slots: SlotMap<SubjectRef>,
}
