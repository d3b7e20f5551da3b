//! PDF text extraction using lopdf and pdf-extract.

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Extracted content from a PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Page texts joined in page order.
    pub text: String,
    /// Pages with their content.
    pub pages: Vec<PdfPage>,
}

/// Content from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Extract every page separately and join them.
    ///
    /// Pages whose text cannot be decoded contribute an empty string.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut pages = Vec::with_capacity(page_count as usize);
        let mut full_text = String::new();

        for number in 1..=page_count {
            let text = self.extract_page_text(number).unwrap_or_else(|e| {
                trace!("Page {} has no decodable text: {}", number, e);
                String::new()
            });

            if !text.is_empty() {
                if !full_text.is_empty() {
                    full_text.push('\n');
                }
                full_text.push_str(&text);
            }

            pages.push(PdfPage { number, text });
        }

        debug!("Extracted {} chars from {} pages", full_text.len(), page_count);

        Ok(PdfContent {
            text: full_text,
            pages,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Statement exports are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let extracted = catch_panic(|| pdf_extract::extract_text_from_mem(&self.raw_data))
            .and_then(|result| result.map_err(|e| PdfError::TextExtraction(e.to_string())));

        match extracted {
            Ok(text) => Ok(text),
            Err(e) => {
                // pdf-extract rejects some font encodings lopdf can still decode
                debug!("pdf-extract failed ({}), falling back to per-page extraction", e);
                self.extract_all().map(|content| content.text).map_err(|_| e)
            }
        }
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        catch_panic(|| doc.extract_text(&[page]))?
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Run a text-extraction call, turning a panic inside it into an error.
///
/// Both PDF backends assume well-formed font and encoding tables and can
/// panic on documents that otherwise load fine.
fn catch_panic<T>(f: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        warn!("PDF text extraction panicked: {}", message);
        PdfError::TextExtraction(format!("extractor panicked: {}", message))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        let err = extractor.load(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, PdfError::Parse(_)));
    }

    #[test]
    fn test_extract_without_load() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_text(), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::Parse(_))));
        assert!(matches!(extractor.extract_all(), Err(PdfError::NoPages)));
    }

    #[test]
    fn test_catch_panic_passes_values_through() {
        assert_eq!(catch_panic(|| 42).unwrap(), 42);
    }

    #[test]
    fn test_catch_panic_maps_panic_to_error() {
        let err = catch_panic(|| -> String { panic!("bad font table") }).unwrap_err();
        match err {
            PdfError::TextExtraction(message) => assert!(message.contains("bad font table")),
            other => panic!("unexpected error: {:?}", other),
        }

        let index = 7;
        let err = catch_panic(|| -> String { panic!("glyph {} missing", index) }).unwrap_err();
        assert!(err.to_string().contains("glyph 7 missing"));
    }
}
