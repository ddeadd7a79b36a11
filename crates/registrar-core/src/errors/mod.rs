//! Error handling for the registrar.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod issuance_error;
pub mod registrar_error;
pub mod render_error;
pub mod storage_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::RegistrarErrorCode;
pub use issuance_error::IssuanceError;
pub use registrar_error::{RegistrarError, RegistrarResult};
pub use render_error::RenderError;
pub use storage_error::StorageError;
pub use validation_error::ValidationError;
