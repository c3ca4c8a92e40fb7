//! Diagnostics surfaced while processing citations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Warning,
    Error,
}

/// A structured, non-fatal problem found on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable machine-readable code (e.g. `citation.not_found`)
    pub code: String,

    pub message: String,

    pub severity: DiagnosticSeverity,

    /// Citation key the diagnostic concerns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citekey: Option<String>,

    /// Note file that was looked up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,

    /// Page being processed, filled in by hosts that handle many pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl Diagnostic {
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: DiagnosticSeverity::Warning,
            citekey: None,
            source_path: None,
            page: None,
        }
    }

    pub fn with_citekey(mut self, key: impl Into<String>) -> Self {
        self.citekey = Some(key.into());
        self
    }

    pub fn with_source(mut self, path: impl Into<String>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}
