//! Human-readable status messages produced while processing documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, SpendrError};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Failure class a diagnostic reports, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Text matched neither statement layout.
    UnrecognizedFormat,
    /// A matched amount could not be parsed as a decimal.
    AmountParseFailure,
    /// The text-extraction step failed for the document.
    ExtractionFailure,
    /// The document type or layout is not handled.
    UnsupportedDocument,
}

/// A status message about one document or extraction step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<DiagnosticKind>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            kind: None,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, message)
    }

    pub fn with_kind(mut self, kind: DiagnosticKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Convert a document-level failure into a diagnostic.
    pub fn from_error(source: &str, error: &SpendrError) -> Self {
        match error {
            SpendrError::Extraction(ExtractionError::UnrecognizedFormat) => {
                Self::warning(format!("{}: no recognized statement format", source))
                    .with_kind(DiagnosticKind::UnrecognizedFormat)
            }
            SpendrError::Extraction(ExtractionError::AmountParse { value }) => {
                Self::warning(format!("{}: could not parse amount {:?}", source, value))
                    .with_kind(DiagnosticKind::AmountParseFailure)
            }
            SpendrError::Extraction(ExtractionError::Unsupported(reason)) => {
                Self::warning(format!("{}: {}", source, reason))
                    .with_kind(DiagnosticKind::UnsupportedDocument)
            }
            _ => Self::error(format!("{}: {}", source, error))
                .with_kind(DiagnosticKind::ExtractionFailure),
        }
    }

    pub fn is_problem(&self) -> bool {
        matches!(self.level, DiagnosticLevel::Warning | DiagnosticLevel::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdfError;

    #[test]
    fn test_unrecognized_format_is_warning() {
        let err = SpendrError::from(ExtractionError::UnrecognizedFormat);
        let diag = Diagnostic::from_error("a.pdf", &err);
        assert_eq!(diag.level, DiagnosticLevel::Warning);
        assert_eq!(diag.kind, Some(DiagnosticKind::UnrecognizedFormat));
        assert!(diag.message.starts_with("a.pdf"));
    }

    #[test]
    fn test_pdf_error_is_extraction_failure() {
        let err = SpendrError::from(PdfError::Encrypted);
        let diag = Diagnostic::from_error("locked.pdf", &err);
        assert_eq!(diag.level, DiagnosticLevel::Error);
        assert_eq!(diag.kind, Some(DiagnosticKind::ExtractionFailure));
        assert!(diag.message.contains("encrypted"));
    }

    #[test]
    fn test_is_problem() {
        assert!(!Diagnostic::info("x").is_problem());
        assert!(!Diagnostic::success("x").is_problem());
        assert!(Diagnostic::warning("x").is_problem());
        assert!(Diagnostic::error("x").is_problem());
    }
}
