//! Rule-based statement parser: detect the layout, then extract.

use std::time::Instant;

use tracing::{debug, info};

use super::aggregate::extract_aggregate;
use super::categorizer::Categorizer;
use super::format::{FormatDetector, FormatKind, FormatMatch};
use super::itemized::itemize;
use super::rules::format_amount;
use super::Result;
use crate::diagnostic::Diagnostic;
use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, SpendrConfig};
use crate::models::transaction::Transaction;

/// Result of parsing one statement's text.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Detected layout.
    pub format: FormatKind,
    /// Extracted transactions, in document order.
    pub transactions: Vec<Transaction>,
    /// Step diagnostics (counts, totals, skipped items).
    pub diagnostics: Vec<Diagnostic>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for statement parsing.
pub trait StatementParser {
    /// Parse statement text originating from `source`.
    fn parse(&self, text: &str, source: &str) -> Result<ExtractionResult>;
}

/// Regex-driven parser for the supported statement layouts.
pub struct RuleBasedParser {
    detector: FormatDetector,
    categorizer: Categorizer,
    config: ExtractionConfig,
}

impl RuleBasedParser {
    /// Create a parser with the default category table and labels.
    pub fn new() -> Self {
        Self {
            detector: FormatDetector::default(),
            categorizer: Categorizer::default(),
            config: ExtractionConfig::default(),
        }
    }

    /// Create a parser from a loaded configuration.
    pub fn from_config(config: &SpendrConfig) -> Self {
        Self::new()
            .with_categorizer(Categorizer::new(config.categories.clone()))
            .with_extraction_config(config.extraction.clone())
    }

    pub fn with_categorizer(mut self, categorizer: Categorizer) -> Self {
        self.categorizer = categorizer;
        self
    }

    pub fn with_detector(mut self, detector: FormatDetector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn categorizer(&self) -> &Categorizer {
        &self.categorizer
    }

    pub fn extraction_config(&self) -> &ExtractionConfig {
        &self.config
    }
}

impl Default for RuleBasedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StatementParser for RuleBasedParser {
    fn parse(&self, text: &str, source: &str) -> Result<ExtractionResult> {
        let start = Instant::now();

        info!("Parsing {} from {} characters of text", source, text.len());

        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyText);
        }

        let found = self
            .detector
            .detect(text)
            .ok_or(ExtractionError::UnrecognizedFormat)?;
        let format = found.kind();

        let (transactions, diagnostics) = match found {
            FormatMatch::AggregateTotal { amount_text } => {
                let transaction = extract_aggregate(&amount_text, source, &self.config)?;
                let message = format!(
                    "{} total: {}",
                    format.vendor(),
                    format_amount(transaction.amount, &self.config.currency_symbol)
                );
                (vec![transaction], vec![Diagnostic::success(message)])
            }
            FormatMatch::ItemizedList { amount_texts } => {
                let extraction = itemize(&amount_texts, text, source, &self.categorizer, &self.config);
                (extraction.transactions, extraction.diagnostics)
            }
        };

        debug!(
            "{}: {:?} produced {} transactions",
            source,
            format,
            transactions.len()
        );

        Ok(ExtractionResult {
            format,
            transactions,
            diagnostics,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{CategoryRule, CategoryRules};
    use crate::models::transaction::Category;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_parse_aggregate_statement() {
        let text = r#"
            Paytm
            Passbook statement for 01 Mar'24 - 31 Mar'24
            Total Money Paid - Rs. 1,234.50
            Total Money Received - Rs. 200
        "#;

        let result = RuleBasedParser::new().parse(text, "paytm.pdf").unwrap();

        assert_eq!(result.format, FormatKind::AggregateTotal);
        assert_eq!(result.transactions.len(), 1);
        assert_eq!(result.transactions[0].category, Category::Total);
        assert_eq!(result.transactions[0].amount, Decimal::from_str("1234.50").unwrap());
        assert_eq!(result.diagnostics[0].message, "Paytm total: Rs.1,234.50");
    }

    #[test]
    fn test_parse_itemized_statement() {
        let text = r#"
            Transaction Statement for 98XXXXXX10
            Mar 02, 2024 Paid to Cafe Mocha Debit INR 100.00
            Mar 03, 2024 Paid to Blinkit Debit INR 1,050.75
        "#;

        let result = RuleBasedParser::new().parse(text, "phonepe.pdf").unwrap();

        assert_eq!(result.format, FormatKind::ItemizedList);
        assert_eq!(result.transactions.len(), 2);
        // Payee capture runs to end of line, including the trailing amount text
        assert!(result.transactions[0].description.starts_with("Cafe Mocha"));
        assert_eq!(result.transactions[0].category, Category::FoodAndDining);
        assert_eq!(result.transactions[1].category, Category::Groceries);
    }

    #[test]
    fn test_parse_unrecognized() {
        let err = RuleBasedParser::new()
            .parse("HDFC Bank\nClosing balance 10,000.00", "hdfc.pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnrecognizedFormat));
    }

    #[test]
    fn test_parse_empty_text() {
        let err = RuleBasedParser::new().parse("  \n ", "blank.pdf").unwrap_err();
        assert!(matches!(err, ExtractionError::EmptyText));
    }

    #[test]
    fn test_parse_aggregate_bad_amount() {
        let err = RuleBasedParser::new()
            .parse("Total Money Paid - Rs. ,", "paytm.pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::AmountParse { .. }));
    }

    #[test]
    fn test_from_config_uses_custom_rules() {
        let mut config = SpendrConfig::default();
        config.categories =
            CategoryRules::new(vec![CategoryRule::new(Category::Healthcare, ["mocha"])]);
        config.extraction.unknown_payee = "N/A".to_string();

        let parser = RuleBasedParser::from_config(&config);
        let result = parser
            .parse("Paid to Cafe Mocha\nINR 10\nINR 20", "p.pdf")
            .unwrap();

        assert_eq!(result.transactions[0].category, Category::Healthcare);
        assert_eq!(result.transactions[1].description, "N/A");
    }
}
