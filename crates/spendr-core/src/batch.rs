//! Sequential per-document processing into one ledger.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{ExtractionError, Result, SpendrError};
use crate::ledger::TransactionLedger;
use crate::models::config::SpendrConfig;
use crate::models::document::{Document, DocumentKind};
use crate::models::transaction::Transaction;
use crate::pdf::extract_document_text;
use crate::statement::{FormatKind, RuleBasedParser, StatementParser};

/// Outcome of processing one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Document name.
    pub source: String,
    /// Detected statement layout, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatKind>,
    /// Transactions contributed by this document.
    pub transactions: Vec<Transaction>,
    /// Everything worth telling the user about this document.
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            format: None,
            transactions: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn failed(source: &str, error: &SpendrError) -> Self {
        let mut report = Self::new(source);
        report.diagnostics.push(Diagnostic::from_error(source, error));
        report
    }

    /// Whether any diagnostic carries `kind`.
    pub fn has_kind(&self, kind: DiagnosticKind) -> bool {
        self.diagnostics.iter().any(|d| d.kind == Some(kind))
    }

    pub fn total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// Results of a whole run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Every transaction, in document then extraction order.
    pub ledger: TransactionLedger,
    /// One report per input document, in input order.
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.documents.iter().flat_map(|d| d.diagnostics.iter())
    }

    /// Documents that contributed nothing.
    pub fn failed_documents(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents.iter().filter(|d| d.transactions.is_empty())
    }
}

/// Runs every document through text extraction and the statement parser.
///
/// A document never affects another: each failure becomes a diagnostic on
/// that document's report and processing moves on.
pub struct BatchProcessor<P = RuleBasedParser> {
    parser: P,
}

impl BatchProcessor<RuleBasedParser> {
    pub fn new() -> Self {
        Self::with_parser(RuleBasedParser::new())
    }

    pub fn from_config(config: &SpendrConfig) -> Self {
        Self::with_parser(RuleBasedParser::from_config(config))
    }
}

impl Default for BatchProcessor<RuleBasedParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: StatementParser> BatchProcessor<P> {
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Process every document, appending to one ledger.
    pub fn run<I>(&self, documents: I) -> BatchReport
    where
        I: IntoIterator<Item = Document>,
    {
        self.run_with(documents, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_document` after each document.
    pub fn run_with<I, F>(&self, documents: I, mut on_document: F) -> BatchReport
    where
        I: IntoIterator<Item = Document>,
        F: FnMut(&DocumentReport),
    {
        let mut report = BatchReport::default();

        for document in documents {
            let doc_report = self.process(&document);
            on_document(&doc_report);
            report.ledger.extend(doc_report.transactions.iter().cloned());
            report.documents.push(doc_report);
        }

        info!(
            "Processed {} documents into {} transactions",
            report.documents.len(),
            report.ledger.len()
        );
        report
    }

    /// Process a single document. Never fails; failures are reported.
    pub fn process(&self, document: &Document) -> DocumentReport {
        debug!("Processing {} as {:?}", document.name, document.kind);

        let result = match document.kind {
            DocumentKind::Pdf => extract_document_text(&document.data)
                .map_err(SpendrError::from)
                .and_then(|text| self.parse_text(&text, &document.name)),
            DocumentKind::Text => std::str::from_utf8(&document.data)
                .map_err(|e| SpendrError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
                .and_then(|text| self.parse_text(text, &document.name)),
            DocumentKind::Csv => self.import_csv(document),
            DocumentKind::Other => Err(ExtractionError::Unsupported(
                "only PDF, text and CSV documents are supported".to_string(),
            )
            .into()),
        };

        result.unwrap_or_else(|e| {
            warn!("{}: {}", document.name, e);
            DocumentReport::failed(&document.name, &e)
        })
    }

    fn parse_text(&self, text: &str, source: &str) -> Result<DocumentReport> {
        let extraction = self.parser.parse(text, source)?;

        let mut report = DocumentReport::new(source);
        report.format = Some(extraction.format);
        report.transactions = extraction.transactions;
        report.diagnostics = extraction.diagnostics;
        Ok(report)
    }

    fn import_csv(&self, document: &Document) -> Result<DocumentReport> {
        let import = TransactionLedger::read_csv(document.data.as_slice(), &document.name)?;

        let mut report = DocumentReport::new(&document.name);
        report.diagnostics = import.diagnostics;
        report.diagnostics.push(Diagnostic::info(format!(
            "Loaded {} transactions from {}",
            import.transactions.len(),
            document.name
        )));
        report.transactions = import.transactions;
        Ok(report)
    }
}
