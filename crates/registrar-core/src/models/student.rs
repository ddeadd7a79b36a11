//! Student identity records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type StudentId = i64;

/// Closed two-value gender enum used by every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    /// Storage code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Self::Male),
            "F" => Some(Self::Female),
            _ => None,
        }
    }

    /// Relation prefix printed before the parent's name.
    pub fn relation_prefix(self) -> &'static str {
        match self {
            Self::Male => "S.O",
            Self::Female => "D.O",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Male => "Male",
            Self::Female => "Female",
        })
    }
}

/// Everything captured at admission. The three identifiers are unique
/// across all students and never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    pub reg_form_no: String,
    pub u_registration_no: String,
    pub class_roll_no: String,

    pub course_name: String,
    pub batch: String,

    pub student_name: String,
    pub parent_name: String,
    pub mother_name: String,
    pub gender: Gender,

    pub state: String,
    pub district: String,
    #[serde(default)]
    pub tehsil: Option<String>,
    #[serde(default)]
    pub constituency: Option<String>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    pub address: String,
    pub community: String,

    pub mobile: String,
    #[serde(default)]
    pub email_id: Option<String>,

    pub admission_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    #[serde(flatten)]
    pub details: StudentDetails,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.details.u_registration_no, self.details.student_name
        )
    }
}
