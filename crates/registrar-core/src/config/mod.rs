//! Configuration system for the registrar.
//! TOML-based, layered resolution: overrides > env > project > defaults.

pub mod institution_config;
pub mod issuance_config;
pub mod registrar_config;
pub mod storage_config;

pub use institution_config::InstitutionConfig;
pub use issuance_config::IssuanceConfig;
pub use registrar_config::{ConfigOverrides, RegistrarConfig};
pub use storage_config::StorageConfig;
