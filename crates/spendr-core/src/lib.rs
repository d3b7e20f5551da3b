//! Core library for payment statement expense tracking.
//!
//! This crate provides:
//! - PDF text extraction
//! - Statement format detection (Paytm aggregate totals, PhonePe itemized lists)
//! - Keyword-based categorization of payees
//! - A transaction ledger with grand totals, category breakdowns and CSV export

pub mod batch;
pub mod diagnostic;
pub mod error;
pub mod ledger;
pub mod models;
pub mod pdf;
pub mod statement;

pub use batch::{BatchProcessor, BatchReport, DocumentReport};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticLevel};
pub use error::{ExtractionError, PdfError, Result, SpendrError};
pub use ledger::{TransactionLedger, EXPORT_HEADER};
pub use models::config::SpendrConfig;
pub use models::document::{Document, DocumentKind};
pub use models::transaction::{Category, CategorySummary, Transaction};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use statement::{Categorizer, FormatKind, RuleBasedParser, StatementParser};
