//! Document rendering errors.

use super::error_code::{self, RegistrarErrorCode};

/// A rendering failure. Reported to the caller alongside the already
/// committed certificate; never rolls it back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("failed to render certificate {certificate_id}: {message}")]
    Failed { certificate_id: i64, message: String },
}

impl RegistrarErrorCode for RenderError {
    fn error_code(&self) -> &'static str {
        error_code::RENDER_ERROR
    }
}
