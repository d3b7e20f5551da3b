//! PDF processing module.

mod extractor;

pub use extractor::{PdfContent, PdfExtractor, PdfPage};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;
}

/// Load `data` and return its concatenated text.
pub fn extract_document_text(data: &[u8]) -> Result<String> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_text()
}
