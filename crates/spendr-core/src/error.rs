//! Error types for the spendr-core library.

use thiserror::Error;

/// Main error type for the spendr library.
#[derive(Error, Debug)]
pub enum SpendrError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Statement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF text extraction.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to statement field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A matched numeric substring is not a valid decimal.
    #[error("failed to parse amount: {value:?}")]
    AmountParse { value: String },

    /// The text matches neither supported statement layout.
    #[error("unrecognized statement format")]
    UnrecognizedFormat,

    /// The document produced no text to work with.
    #[error("no text extracted from document")]
    EmptyText,

    /// The document is not in a layout this crate reads.
    #[error("unsupported document: {0}")]
    Unsupported(String),
}

/// Result type for the spendr library.
pub type Result<T> = std::result::Result<T, SpendrError>;
