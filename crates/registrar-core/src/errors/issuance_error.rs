//! Certificate issuance refusals.

use chrono::NaiveDate;

use super::error_code::{self, RegistrarErrorCode};
use crate::models::CertificateType;

#[derive(Debug, thiserror::Error)]
pub enum IssuanceError {
    #[error(
        "cannot issue {certificate_type} certificate: last issued on {last_issued}, \
         wait {remaining_days} more days"
    )]
    Ineligible {
        certificate_type: CertificateType,
        last_issued: NaiveDate,
        remaining_days: u32,
    },

    #[error("concurrent {certificate_type} issuance for student {student_id} lost the race")]
    Conflict {
        certificate_type: CertificateType,
        student_id: i64,
    },
}

impl RegistrarErrorCode for IssuanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Ineligible { .. } => error_code::INELIGIBLE,
            Self::Conflict { .. } => error_code::CONFLICT,
        }
    }
}
