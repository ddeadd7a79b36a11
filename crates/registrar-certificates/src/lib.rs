//! # registrar-certificates
//!
//! Certificate issuance. Eligibility is a pure function of the last issue
//! date and an injected "today"; issuance re-checks it inside the storage
//! transaction that writes the certificate, then renders outside it.

pub mod eligibility;
pub mod engine;
pub mod numbering;
pub mod policy;
pub mod render;

pub use eligibility::{Eligibility, EligibilityReport};
pub use engine::{IssuanceEngine, IssueRequest, IssuedCertificate};
pub use numbering::CertificateNumbering;
pub use policy::CooldownPolicy;
pub use render::TextBonafideRenderer;
