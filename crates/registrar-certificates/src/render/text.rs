//! Plain-text bonafide certificate.

use std::fmt::Write;

use chrono::Datelike;
use registrar_core::config::InstitutionConfig;
use registrar_core::errors::RenderError;
use registrar_core::models::{CertificateSnapshot, CertificateType};
use registrar_core::traits::{IDocumentRenderer, RenderedDocument};

use crate::numbering::CertificateNumbering;

const SEMESTER_PLACEHOLDER: &str = "_____________";

/// Renders bonafide certificates as UTF-8 text. Output depends only on the
/// snapshot and the configuration, so a stored certificate re-renders
/// byte for byte.
#[derive(Debug, Clone, Default)]
pub struct TextBonafideRenderer {
    institution: InstitutionConfig,
    numbering: CertificateNumbering,
}

impl TextBonafideRenderer {
    pub fn new(institution: InstitutionConfig, numbering: CertificateNumbering) -> Self {
        Self {
            institution,
            numbering,
        }
    }

    pub fn file_name(snapshot: &CertificateSnapshot) -> String {
        format!(
            "bonafide_{}_{}.txt",
            snapshot.student.details.u_registration_no,
            snapshot.certificate.issue_date.format("%Y-%m-%d")
        )
    }

    fn body(&self, snapshot: &CertificateSnapshot) -> Result<String, std::fmt::Error> {
        let student = &snapshot.student.details;
        let certificate = &snapshot.certificate;
        let semester = snapshot
            .enrollment
            .as_ref()
            .map(|e| e.semester.semester_name.as_str())
            .unwrap_or(SEMESTER_PLACEHOLDER);
        let year = match &snapshot.enrollment {
            Some(e) => e.session.session_code.clone(),
            None => certificate.issue_date.year().to_string(),
        };

        let mut out = String::new();
        for line in self.institution.header_lines() {
            writeln!(out, "{line}")?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}    Dated: {}",
            self.numbering.display_number(certificate),
            certificate.issue_date.format("%d-%m-%Y")
        )?;
        writeln!(out)?;
        writeln!(out, "BONAFIDE CERTIFICATE")?;
        writeln!(out)?;
        writeln!(out, "This is certified that {}", student.student_name)?;
        writeln!(
            out,
            "{} {}",
            student.gender.relation_prefix(),
            student.parent_name
        )?;
        writeln!(out, "is currently enrolled in")?;
        writeln!(out, "UG {semester} Semester in this college for the")?;
        writeln!(out, "Year {year}")?;
        writeln!(out, "Batch {}", student.batch)?;
        writeln!(out, "Class Roll.No. {}", student.class_roll_no)?;
        writeln!(out, "Registration No. {}", student.u_registration_no)?;
        writeln!(out, "Course: {}", student.course_name)?;
        if let Some(purpose) = &certificate.purpose {
            writeln!(out, "Purpose: {purpose}")?;
        }
        writeln!(out)?;
        writeln!(out, "Dated: {}", certificate.issue_date.format("%d/%m/%Y"))?;
        writeln!(out)?;
        writeln!(out, "{}", self.institution.effective_signatory())?;
        Ok(out)
    }
}

impl IDocumentRenderer for TextBonafideRenderer {
    fn render(&self, snapshot: &CertificateSnapshot) -> Result<RenderedDocument, RenderError> {
        let certificate_id = snapshot.certificate.id;
        if snapshot.certificate.certificate_type != CertificateType::Bonafide {
            return Err(RenderError::Failed {
                certificate_id,
                message: format!(
                    "no text layout for {} certificates",
                    snapshot.certificate.certificate_type.display_name()
                ),
            });
        }
        let body = self.body(snapshot).map_err(|e| RenderError::Failed {
            certificate_id,
            message: e.to_string(),
        })?;
        Ok(RenderedDocument {
            file_name: Self::file_name(snapshot),
            content_type: "text/plain; charset=utf-8".to_string(),
            bytes: body.into_bytes(),
        })
    }
}
