//! Static reference data: academic sessions, semesters, subjects.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slots::SlotCategory;

pub type SessionId = i64;
pub type SemesterId = i64;
pub type SubjectId = i64;

/// A date-bounded academic term. `is_current` is advisory: nothing stops
/// two sessions from carrying the flag at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicSession {
    pub id: SessionId,
    pub session_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub session_code: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_current: bool,
}

/// Ordinal stage of a course, unique by `semester_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub semester_number: u32,
    pub semester_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub subject_code: String,
    pub subject_name: String,
    pub course_type: CourseType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubject {
    pub subject_code: String,
    pub subject_name: String,
    pub course_type: CourseType,
}

/// Closed set of course types a subject can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CourseType {
    #[serde(rename = "MAJOR")]
    Major,
    #[serde(rename = "MINOR")]
    Minor,
    #[serde(rename = "MD1")]
    Multidisciplinary1,
    #[serde(rename = "MD2")]
    Multidisciplinary2,
    #[serde(rename = "SKILL")]
    SkillEnhancement,
    #[serde(rename = "VAC1")]
    ValueAdded1,
    #[serde(rename = "VAC2")]
    ValueAdded2,
    #[serde(rename = "AEC")]
    AbilityEnhancement,
}

impl CourseType {
    pub const ALL: [CourseType; 8] = [
        Self::Major,
        Self::Minor,
        Self::Multidisciplinary1,
        Self::Multidisciplinary2,
        Self::SkillEnhancement,
        Self::ValueAdded1,
        Self::ValueAdded2,
        Self::AbilityEnhancement,
    ];

    /// Storage code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
            Self::Multidisciplinary1 => "MD1",
            Self::Multidisciplinary2 => "MD2",
            Self::SkillEnhancement => "SKILL",
            Self::ValueAdded1 => "VAC1",
            Self::ValueAdded2 => "VAC2",
            Self::AbilityEnhancement => "AEC",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Major => "Major Course",
            Self::Minor => "Minor Course",
            Self::Multidisciplinary1 => "Multidisciplinary 1",
            Self::Multidisciplinary2 => "Multidisciplinary 2",
            Self::SkillEnhancement => "Skill Enhancement",
            Self::ValueAdded1 => "Value Added Course 1",
            Self::ValueAdded2 => "Value Added Course 2",
            Self::AbilityEnhancement => "Ability Enhancement Course",
        }
    }

    /// The enrollment slot that accepts subjects of this type.
    pub fn slot(self) -> SlotCategory {
        match self {
            Self::Major => SlotCategory::Major,
            Self::Minor => SlotCategory::Minor,
            Self::Multidisciplinary1 => SlotCategory::Md1,
            Self::Multidisciplinary2 => SlotCategory::Md2,
            Self::SkillEnhancement => SlotCategory::Skill,
            Self::ValueAdded1 => SlotCategory::Vac1,
            Self::ValueAdded2 => SlotCategory::Vac2,
            Self::AbilityEnhancement => SlotCategory::Aec,
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CourseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown course type: {s}"))
    }
}
