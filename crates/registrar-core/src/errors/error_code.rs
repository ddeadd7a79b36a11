//! RegistrarErrorCode trait for the presentation boundary.

/// Stable, machine-readable error codes.
/// Every error enum implements this so the presentation layer can map
/// failures to user messages without matching on display strings.
pub trait RegistrarErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INELIGIBLE: &str = "INELIGIBLE";
pub const CONFLICT: &str = "CONFLICT";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const RENDER_ERROR: &str = "RENDER_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
