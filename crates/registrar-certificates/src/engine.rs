//! IssuanceEngine: eligibility checks, atomic issuance, download, history.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use registrar_core::config::RegistrarConfig;
use registrar_core::errors::{
    IssuanceError, RegistrarError, RegistrarResult, RenderError, ValidationError,
};
use registrar_core::models::{
    CertificateId, CertificateRecord, CertificateSnapshot, CertificateType, NewCertificate,
    StudentId,
};
use registrar_core::traits::{Clock, IDocumentRenderer, IRegistrarStorage, RenderedDocument};

use crate::eligibility::{Eligibility, EligibilityReport};
use crate::numbering::CertificateNumbering;
use crate::policy::CooldownPolicy;

/// Caller input for one issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub student_id: StudentId,
    pub certificate_type: CertificateType,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    /// Acting user's name. Falls back to the configured default issuer.
    #[serde(default)]
    pub issued_by: Option<String>,
    #[serde(default)]
    pub certificate_number: Option<String>,
}

impl IssueRequest {
    pub fn new(student_id: StudentId, certificate_type: CertificateType) -> Self {
        Self {
            student_id,
            certificate_type,
            purpose: None,
            remarks: None,
            issued_by: None,
            certificate_number: None,
        }
    }

    pub fn bonafide(student_id: StudentId) -> Self {
        Self::new(student_id, CertificateType::Bonafide)
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = non_blank(purpose.into());
        self
    }

    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = non_blank(remarks.into());
        self
    }

    pub fn issued_by(mut self, issuer: impl Into<String>) -> Self {
        self.issued_by = non_blank(issuer.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.certificate_number = non_blank(number.into());
        self
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A committed certificate plus the outcome of rendering it.
/// A render failure never undoes the certificate.
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub snapshot: CertificateSnapshot,
    pub display_number: String,
    pub document: Result<RenderedDocument, RenderError>,
}

impl IssuedCertificate {
    pub fn certificate(&self) -> &CertificateRecord {
        &self.snapshot.certificate
    }
}

pub struct IssuanceEngine<'a> {
    storage: &'a dyn IRegistrarStorage,
    policy: CooldownPolicy,
    numbering: CertificateNumbering,
    default_issuer: String,
    clock: Arc<dyn Clock>,
    renderer: Arc<dyn IDocumentRenderer>,
}

impl<'a> IssuanceEngine<'a> {
    pub fn new(
        storage: &'a dyn IRegistrarStorage,
        config: &RegistrarConfig,
        clock: Arc<dyn Clock>,
        renderer: Arc<dyn IDocumentRenderer>,
    ) -> Self {
        Self {
            storage,
            policy: CooldownPolicy::from_config(&config.issuance),
            numbering: CertificateNumbering::from_config(&config.issuance),
            default_issuer: config.issuance.effective_default_issuer().to_string(),
            clock,
            renderer,
        }
    }

    pub fn policy(&self) -> &CooldownPolicy {
        &self.policy
    }

    fn require_student(&self, student_id: StudentId) -> RegistrarResult<()> {
        self.storage
            .get_student(student_id)?
            .map(|_| ())
            .ok_or_else(|| RegistrarError::not_found("student", student_id))
    }

    /// Current eligibility. Read-only; calling it never changes state.
    pub fn check_eligibility(
        &self,
        student_id: StudentId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<Eligibility> {
        self.require_student(student_id)?;
        let Some(cooldown) = self.policy.cooldown_days(certificate_type) else {
            return Ok(Eligibility::Eligible);
        };
        let last = self.storage.last_issue_date(student_id, certificate_type)?;
        Ok(Eligibility::evaluate(last, self.clock.today(), cooldown))
    }

    pub fn eligibility_report(
        &self,
        student_id: StudentId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<EligibilityReport> {
        self.require_student(student_id)?;
        let last = self.storage.last_issue_date(student_id, certificate_type)?;
        Ok(EligibilityReport::build(
            last,
            self.clock.today(),
            self.policy.cooldown_days(certificate_type),
        ))
    }

    /// Issue a certificate dated today.
    ///
    /// The cooldown is re-evaluated inside the write transaction, against
    /// the last issue date read in that transaction, so an earlier
    /// `check_eligibility` result is never trusted. The latest enrollment
    /// is captured in the same transaction and handed to the renderer
    /// unchanged after commit.
    pub fn issue(&self, request: &IssueRequest) -> RegistrarResult<IssuedCertificate> {
        let today = self.clock.today();
        let certificate_type = request.certificate_type;
        let cooldown = self.policy.cooldown_days(certificate_type);

        let gate = |last: Option<NaiveDate>| -> RegistrarResult<()> {
            let Some(days) = cooldown else {
                return Ok(());
            };
            match Eligibility::evaluate(last, today, days) {
                Eligibility::Eligible => Ok(()),
                Eligibility::CoolingDown {
                    last_issue_date,
                    remaining_days,
                } => Err(IssuanceError::Ineligible {
                    certificate_type,
                    last_issued: last_issue_date,
                    remaining_days,
                }
                .into()),
            }
        };

        let certificate = NewCertificate {
            student_id: request.student_id,
            certificate_type,
            certificate_number: request.certificate_number.clone(),
            issue_date: today,
            purpose: request.purpose.clone(),
            remarks: request.remarks.clone(),
            issued_by: Some(
                request
                    .issued_by
                    .clone()
                    .unwrap_or_else(|| self.default_issuer.clone()),
            ),
        };

        let snapshot = match self.storage.record_certificate(&certificate, &gate) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                if e.is_not_eligible() {
                    info!(
                        student_id = request.student_id,
                        %certificate_type,
                        remaining_days = ?e.remaining_days(),
                        "issuance refused"
                    );
                }
                return Err(e);
            }
        };

        let display_number = self.numbering.display_number(&snapshot.certificate);
        info!(
            student_id = snapshot.student.id,
            certificate_id = snapshot.certificate.id,
            enrollment_id = ?snapshot.certificate.enrollment_id,
            %certificate_type,
            %display_number,
            "certificate issued"
        );

        let document = self.renderer.render(&snapshot);
        if let Err(e) = &document {
            warn!(
                certificate_id = snapshot.certificate.id,
                error = %e,
                "certificate committed but rendering failed"
            );
        }

        Ok(IssuedCertificate {
            snapshot,
            display_number,
            document,
        })
    }

    /// Issue a bonafide certificate. Blank purpose or remarks are stored as absent.
    pub fn issue_bonafide(
        &self,
        student_id: StudentId,
        purpose: &str,
        remarks: &str,
        issued_by: Option<&str>,
    ) -> RegistrarResult<IssuedCertificate> {
        let mut request = IssueRequest::bonafide(student_id)
            .with_purpose(purpose)
            .with_remarks(remarks);
        if let Some(issuer) = issued_by {
            request = request.issued_by(issuer);
        }
        self.issue(&request)
    }

    /// The stored certificate with the student and the enrollment snapshot
    /// taken at issuance. The snapshot is `None` when that enrollment has
    /// since been deleted.
    pub fn fetch_for_download(
        &self,
        certificate_id: CertificateId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<CertificateSnapshot> {
        self.storage
            .certificate_snapshot(certificate_id, certificate_type)?
            .ok_or_else(|| {
                RegistrarError::not_found(
                    "certificate",
                    format!("{certificate_type} #{certificate_id}"),
                )
            })
    }

    /// Re-render a stored certificate.
    pub fn render_for_download(
        &self,
        certificate_id: CertificateId,
        certificate_type: CertificateType,
    ) -> RegistrarResult<RenderedDocument> {
        let snapshot = self.fetch_for_download(certificate_id, certificate_type)?;
        Ok(self.renderer.render(&snapshot)?)
    }

    /// Newest first.
    pub fn history(
        &self,
        student_id: StudentId,
        certificate_type: Option<CertificateType>,
    ) -> RegistrarResult<Vec<CertificateRecord>> {
        self.require_student(student_id)?;
        self.storage.list_certificates(student_id, certificate_type)
    }

    pub fn display_number(&self, certificate: &CertificateRecord) -> String {
        self.numbering.display_number(certificate)
    }

    /// Attach an official number to a certificate issued without one.
    pub fn assign_number(
        &self,
        certificate_id: CertificateId,
        number: &str,
    ) -> RegistrarResult<()> {
        let number = number.trim();
        if number.is_empty() {
            return Err(ValidationError::invalid("certificate_number", "must not be blank").into());
        }
        self.storage.assign_certificate_number(certificate_id, number)?;
        info!(certificate_id, number, "certificate number assigned");
        Ok(())
    }
}
