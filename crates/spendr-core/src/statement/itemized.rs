//! Itemized statements: amounts paired positionally with payee lines.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::categorizer::Categorizer;
use super::format::FormatKind;
use super::rules::{
    format_amount, pair_positionally, parse_amount, AmountExtractor, FieldExtractor, PayeeExtractor,
};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::models::config::ExtractionConfig;
use crate::models::transaction::Transaction;

/// Transactions and step diagnostics for one itemized document.
#[derive(Debug, Clone, Default)]
pub struct ItemizedExtraction {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ItemizedExtraction {
    /// Sum of this document's transaction amounts.
    pub fn total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }
}

/// Extract every `INR <amount>` item from `text`.
pub fn extract_itemized(
    text: &str,
    source: &str,
    categorizer: &Categorizer,
    config: &ExtractionConfig,
) -> ItemizedExtraction {
    let amount_texts: Vec<String> = AmountExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();

    itemize(&amount_texts, text, source, categorizer, config)
}

/// Build transactions from already-located amount texts.
///
/// Payees are read from `text` and paired by index; an amount without a payee
/// at its index is described as `config.unknown_payee`. An amount that does
/// not parse is skipped on its own. Labels follow the amount index, so a
/// skipped item leaves a gap in the numbering.
pub fn itemize(
    amount_texts: &[String],
    text: &str,
    source: &str,
    categorizer: &Categorizer,
    config: &ExtractionConfig,
) -> ItemizedExtraction {
    let mut result = ItemizedExtraction::default();

    if amount_texts.is_empty() {
        result.diagnostics.push(
            Diagnostic::warning(format!("{}: no amounts found", source))
                .with_kind(DiagnosticKind::UnrecognizedFormat),
        );
        return result;
    }

    let vendor = FormatKind::ItemizedList.vendor();

    result.diagnostics.push(Diagnostic::info(format!(
        "Found {} amounts in {} statement",
        amount_texts.len(),
        vendor
    )));

    let payees: Vec<String> = PayeeExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect();

    if payees.len() != amount_texts.len() {
        debug!(
            "{}: {} amounts but {} payees, pairing by position",
            source,
            amount_texts.len(),
            payees.len()
        );
    }

    for (i, (amount_text, payee)) in pair_positionally(amount_texts, payees.as_slice(), &config.unknown_payee)
        .into_iter()
        .enumerate()
    {
        let Some(amount) = parse_amount(amount_text) else {
            warn!("{}: skipping item {} with amount {:?}", source, i + 1, amount_text);
            result.diagnostics.push(
                Diagnostic::warning(format!(
                    "{}: skipped transaction {}, could not parse amount {:?}",
                    source,
                    i + 1,
                    amount_text
                ))
                .with_kind(DiagnosticKind::AmountParseFailure),
            );
            continue;
        };

        result.transactions.push(Transaction::new(
            format!("Transaction {}", i + 1),
            payee,
            amount,
            categorizer.categorize(payee),
            source,
        ));
    }

    result.diagnostics.push(Diagnostic::success(format!(
        "{} total: {}",
        vendor,
        format_amount(result.total(), &config.currency_symbol)
    )));

    result
}
