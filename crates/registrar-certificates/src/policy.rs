//! Which certificate types are rate-limited, and by how much.

use registrar_core::config::IssuanceConfig;
use registrar_core::constants::DEFAULT_BONAFIDE_COOLDOWN_DAYS;
use registrar_core::models::CertificateType;

/// Cooldown per certificate type. Only bonafide certificates are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    bonafide_days: u32,
}

impl CooldownPolicy {
    pub fn new(bonafide_days: u32) -> Self {
        Self { bonafide_days }
    }

    pub fn from_config(config: &IssuanceConfig) -> Self {
        Self::new(config.effective_bonafide_cooldown_days())
    }

    /// `None` means the type may be issued any number of times.
    pub fn cooldown_days(&self, certificate_type: CertificateType) -> Option<u32> {
        match certificate_type {
            CertificateType::Bonafide => Some(self.bonafide_days),
            CertificateType::MarksSheet
            | CertificateType::Degree
            | CertificateType::DischargeCumCharacter
            | CertificateType::CharacterForNotPassed => None,
        }
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BONAFIDE_COOLDOWN_DAYS)
    }
}
