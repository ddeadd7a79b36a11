//! Certificate issuance configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BONAFIDE_COOLDOWN_DAYS, DEFAULT_CERTIFICATE_NUMBER_OFFSET,
    DEFAULT_CERTIFICATE_NUMBER_PREFIX, DEFAULT_ISSUER,
};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IssuanceConfig {
    /// Days between two bonafide certificates. Default: 180.
    pub bonafide_cooldown_days: Option<u32>,
    /// Printed number prefix. Default: `SMMDCZ/GN`.
    pub number_prefix: Option<String>,
    /// Added to the certificate id in the printed number. Default: 100.
    pub number_offset: Option<i64>,
    /// Issuer recorded when none is supplied. Default: `Admin`.
    pub default_issuer: Option<String>,
}

impl IssuanceConfig {
    pub fn effective_bonafide_cooldown_days(&self) -> u32 {
        self.bonafide_cooldown_days
            .unwrap_or(DEFAULT_BONAFIDE_COOLDOWN_DAYS)
    }

    pub fn effective_number_prefix(&self) -> &str {
        self.number_prefix
            .as_deref()
            .unwrap_or(DEFAULT_CERTIFICATE_NUMBER_PREFIX)
    }

    pub fn effective_number_offset(&self) -> i64 {
        self.number_offset
            .unwrap_or(DEFAULT_CERTIFICATE_NUMBER_OFFSET)
    }

    pub fn effective_default_issuer(&self) -> &str {
        self.default_issuer.as_deref().unwrap_or(DEFAULT_ISSUER)
    }
}
