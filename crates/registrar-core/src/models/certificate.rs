//! Issued certificates.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enrollment::{EnrollmentId, EnrollmentRecord};
use super::student::{Student, StudentId};

pub type CertificateId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificateType {
    Bonafide,
    MarksSheet,
    Degree,
    DischargeCumCharacter,
    #[serde(rename = "character_not_passed")]
    CharacterForNotPassed,
}

impl CertificateType {
    pub const ALL: [CertificateType; 5] = [
        Self::Bonafide,
        Self::MarksSheet,
        Self::Degree,
        Self::DischargeCumCharacter,
        Self::CharacterForNotPassed,
    ];

    /// Storage code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Bonafide => "bonafide",
            Self::MarksSheet => "marks_sheet",
            Self::Degree => "degree",
            Self::DischargeCumCharacter => "discharge_cum_character",
            Self::CharacterForNotPassed => "character_not_passed",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Bonafide => "Bonafide",
            Self::MarksSheet => "Marks Sheet",
            Self::Degree => "Degree",
            Self::DischargeCumCharacter => "Discharge cum Character",
            Self::CharacterForNotPassed => "Character for Not Passed",
        }
    }
}

impl fmt::Display for CertificateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CertificateType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == s)
            .ok_or_else(|| format!("unknown certificate type: {s}"))
    }
}

/// One issued certificate. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub id: CertificateId,
    pub student_id: StudentId,
    /// Enrollment in force at issuance. `None` once that record is deleted.
    pub enrollment_id: Option<EnrollmentId>,
    pub certificate_type: CertificateType,
    pub certificate_number: Option<String>,
    pub issue_date: NaiveDate,
    pub purpose: Option<String>,
    pub remarks: Option<String>,
    pub issued_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CertificateRecord {
    /// Printed number: `{prefix}/{year}/{id + offset}`, zero-padded to two
    /// digits. A presentation convenience; the internal id is the identity.
    pub fn display_number(&self, prefix: &str, offset: i64) -> String {
        format!(
            "{}/{}/{:02}",
            prefix,
            self.issue_date.year(),
            self.id + offset
        )
    }
}

/// Input for recording a certificate. The enrollment snapshot is captured
/// by storage inside the issuing transaction, never supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCertificate {
    pub student_id: StudentId,
    pub certificate_type: CertificateType,
    #[serde(default)]
    pub certificate_number: Option<String>,
    pub issue_date: NaiveDate,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub issued_by: Option<String>,
}

/// Everything a renderer needs: the student, the certificate, and the
/// enrollment snapshot taken when the certificate was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSnapshot {
    pub student: Student,
    pub certificate: CertificateRecord,
    pub enrollment: Option<EnrollmentRecord>,
}
