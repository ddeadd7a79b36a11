//! Institution details printed on certificates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct InstitutionConfig {
    pub office_line: Option<String>,
    pub college_name: Option<String>,
    pub territory_line: Option<String>,
    pub contact_line: Option<String>,
    /// Signatory printed under the signature line. Default: `Principal`.
    pub signatory: Option<String>,
}

impl InstitutionConfig {
    /// Header lines in print order, skipping unset ones.
    pub fn header_lines(&self) -> Vec<&str> {
        [
            &self.office_line,
            &self.college_name,
            &self.territory_line,
            &self.contact_line,
        ]
        .into_iter()
        .filter_map(|line| line.as_deref())
        .collect()
    }

    pub fn effective_signatory(&self) -> &str {
        self.signatory.as_deref().unwrap_or("Principal")
    }
}
