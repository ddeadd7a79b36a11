//! Document rendering collaborator.

use serde::{Deserialize, Serialize};

use crate::errors::RenderError;
use crate::models::CertificateSnapshot;

/// An opaque printable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Turns a certificate snapshot into a printable artifact.
/// Must be deterministic for a given snapshot so stored certificates can
/// be re-rendered on demand.
pub trait IDocumentRenderer: Send + Sync {
    fn render(&self, snapshot: &CertificateSnapshot) -> Result<RenderedDocument, RenderError>;
}
