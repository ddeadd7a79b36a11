//! Top-level error aggregating every subsystem error.

use super::error_code::{self, RegistrarErrorCode};
use super::{ConfigError, IssuanceError, RenderError, StorageError, ValidationError};

/// Errors returned by registrar operations.
/// All variants are per-request and recoverable.
#[derive(Debug, thiserror::Error)]
pub enum RegistrarError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Issuance error: {0}")]
    Issuance(#[from] IssuanceError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type RegistrarResult<T> = Result<T, RegistrarError>;

impl RegistrarError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True when the caller should show "not eligible right now".
    /// A lost issuance race reads the same as an unexpired cooldown.
    pub fn is_not_eligible(&self) -> bool {
        matches!(self, Self::Issuance(_))
    }

    /// Remaining cooldown days, when the refusal carries them.
    pub fn remaining_days(&self) -> Option<u32> {
        match self {
            Self::Issuance(IssuanceError::Ineligible { remaining_days, .. }) => {
                Some(*remaining_days)
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl RegistrarErrorCode for RegistrarError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Validation(e) => e.error_code(),
            Self::Issuance(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Render(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
