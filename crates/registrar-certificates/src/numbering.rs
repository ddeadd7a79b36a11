//! Printed certificate numbers.

use registrar_core::config::IssuanceConfig;
use registrar_core::models::CertificateRecord;

/// Derives `{prefix}/{issue year}/{id + offset}` from a stored certificate.
/// Presentation only: two prefixes or offsets can print the same number
/// for different certificates, so the internal id remains the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateNumbering {
    prefix: String,
    offset: i64,
}

impl CertificateNumbering {
    pub fn new(prefix: impl Into<String>, offset: i64) -> Self {
        Self {
            prefix: prefix.into(),
            offset,
        }
    }

    pub fn from_config(config: &IssuanceConfig) -> Self {
        Self::new(
            config.effective_number_prefix(),
            config.effective_number_offset(),
        )
    }

    pub fn display_number(&self, certificate: &CertificateRecord) -> String {
        certificate.display_number(&self.prefix, self.offset)
    }
}

impl Default for CertificateNumbering {
    fn default() -> Self {
        Self::from_config(&IssuanceConfig::default())
    }
}
