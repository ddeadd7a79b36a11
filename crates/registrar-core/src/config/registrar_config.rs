//! Top-level registrar configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{InstitutionConfig, IssuanceConfig, StorageConfig};
use crate::constants::{CONFIG_FILE_NAME, MAX_READ_POOL_SIZE};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`REGISTRAR_*`)
/// 3. Project config (`registrar.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RegistrarConfig {
    pub storage: StorageConfig,
    pub issuance: IssuanceConfig,
    pub institution: InstitutionConfig,
}

/// Caller-supplied overrides, the highest-priority layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<String>,
    pub bonafide_cooldown_days: Option<u32>,
    pub default_issuer: Option<String>,
}

impl RegistrarConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &RegistrarConfig) -> Result<(), ConfigError> {
        if config.issuance.bonafide_cooldown_days == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "issuance.bonafide_cooldown_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(size) = config.storage.read_pool_size {
            if !(1..=MAX_READ_POOL_SIZE).contains(&size) {
                return Err(ConfigError::ValidationFailed {
                    field: "storage.read_pool_size".to_string(),
                    message: format!("must be between 1 and {MAX_READ_POOL_SIZE}"),
                });
            }
        }
        if let Some(prefix) = &config.issuance.number_prefix {
            if prefix.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "issuance.number_prefix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut RegistrarConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RegistrarConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut RegistrarConfig, other: &RegistrarConfig) {
        // Storage
        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }
        if other.storage.read_pool_size.is_some() {
            base.storage.read_pool_size = other.storage.read_pool_size;
        }

        // Issuance
        if other.issuance.bonafide_cooldown_days.is_some() {
            base.issuance.bonafide_cooldown_days = other.issuance.bonafide_cooldown_days;
        }
        if other.issuance.number_prefix.is_some() {
            base.issuance.number_prefix = other.issuance.number_prefix.clone();
        }
        if other.issuance.number_offset.is_some() {
            base.issuance.number_offset = other.issuance.number_offset;
        }
        if other.issuance.default_issuer.is_some() {
            base.issuance.default_issuer = other.issuance.default_issuer.clone();
        }

        // Institution
        let (b, o) = (&mut base.institution, &other.institution);
        for (dst, src) in [
            (&mut b.office_line, &o.office_line),
            (&mut b.college_name, &o.college_name),
            (&mut b.territory_line, &o.territory_line),
            (&mut b.contact_line, &o.contact_line),
            (&mut b.signatory, &o.signatory),
        ] {
            if src.is_some() {
                *dst = src.clone();
            }
        }
    }

    /// Pattern: `REGISTRAR_DB_PATH`, `REGISTRAR_BONAFIDE_COOLDOWN_DAYS`, etc.
    fn apply_env_overrides(config: &mut RegistrarConfig) {
        if let Ok(val) = std::env::var("REGISTRAR_DB_PATH") {
            config.storage.db_path = Some(val);
        }
        if let Ok(val) = std::env::var("REGISTRAR_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                config.storage.read_pool_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REGISTRAR_BONAFIDE_COOLDOWN_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.issuance.bonafide_cooldown_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("REGISTRAR_DEFAULT_ISSUER") {
            config.issuance.default_issuer = Some(val);
        }
    }

    fn apply_overrides(config: &mut RegistrarConfig, o: &ConfigOverrides) {
        if let Some(ref v) = o.db_path {
            config.storage.db_path = Some(v.clone());
        }
        if let Some(v) = o.bonafide_cooldown_days {
            config.issuance.bonafide_cooldown_days = Some(v);
        }
        if let Some(ref v) = o.default_issuer {
            config.issuance.default_issuer = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
