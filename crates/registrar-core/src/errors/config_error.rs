//! Configuration errors.

use super::error_code::{self, RegistrarErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("registrar config not found at {path}")]
    FileNotFound { path: String },

    #[error("cannot parse registrar config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl RegistrarErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
