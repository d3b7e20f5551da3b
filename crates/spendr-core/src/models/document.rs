//! Input documents handed to the batch processor.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kind of an input document, derived from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// PDF statement; text goes through the PDF extractor.
    Pdf,
    /// Comma-separated file in the export layout.
    Csv,
    /// Statement text that was already extracted.
    Text,
    /// Anything else.
    Other,
}

impl DocumentKind {
    /// Detect the kind from a file name's extension (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Self::Pdf,
            "csv" => Self::Csv,
            "txt" | "text" => Self::Text,
            _ => Self::Other,
        }
    }
}

/// An in-memory document buffer.
#[derive(Debug, Clone)]
pub struct Document {
    /// Identifier used as the transaction source (usually the file name).
    pub name: String,
    /// Detected kind.
    pub kind: DocumentKind,
    /// Raw bytes.
    pub data: Vec<u8>,
}

impl Document {
    /// Create a document, detecting its kind from the name.
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        Self {
            kind: DocumentKind::from_name(&name),
            name,
            data: data.into(),
        }
    }

    /// Create a document with an explicit kind.
    pub fn with_kind(name: impl Into<String>, kind: DocumentKind, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind,
            data: data.into(),
        }
    }

    /// Read a document from disk, naming it after the file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_name() {
        assert_eq!(DocumentKind::from_name("march.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("MARCH.PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_name("expenses.csv"), DocumentKind::Csv);
        assert_eq!(DocumentKind::from_name("dump.txt"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_name("photo.png"), DocumentKind::Other);
        assert_eq!(DocumentKind::from_name("noextension"), DocumentKind::Other);
    }

    #[test]
    fn test_document_new_detects_kind() {
        let doc = Document::new("statement.pdf", b"%PDF".to_vec());
        assert_eq!(doc.kind, DocumentKind::Pdf);
        assert_eq!(doc.name, "statement.pdf");
    }
}
