//! Storage-layer errors for SQLite operations.

use super::error_code::{self, RegistrarErrorCode};

/// Infrastructure failures. None of these leave a partial write behind:
/// every multi-row write runs inside a single transaction.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("database busy: {message}")]
    Busy { message: String },
}

impl StorageError {
    pub fn sqlite(message: impl Into<String>) -> Self {
        Self::SqliteError {
            message: message.into(),
        }
    }
}

impl RegistrarErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SqliteError { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::Busy { .. } => error_code::DB_BUSY,
        }
    }
}
