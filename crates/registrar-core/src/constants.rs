//! Shared constants for the registrar.

/// Days that must elapse between two bonafide certificates for one student.
pub const DEFAULT_BONAFIDE_COOLDOWN_DAYS: u32 = 180;

/// Offset added to the internal certificate id to form the printed number.
pub const DEFAULT_CERTIFICATE_NUMBER_OFFSET: i64 = 100;

/// Prefix of the printed certificate number.
pub const DEFAULT_CERTIFICATE_NUMBER_PREFIX: &str = "SMMDCZ/GN";

/// Issuer recorded when the caller supplies no user name.
pub const DEFAULT_ISSUER: &str = "Admin";

/// Default database file name, relative to the project root.
pub const DEFAULT_DB_FILE: &str = "registrar.db";

/// Default number of read connections.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Maximum number of read connections.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "registrar.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "REGISTRAR_LOG";
