//! Append-only transaction collection with totals, breakdowns and CSV I/O.

use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::error::{ExtractionError, Result};
use crate::models::transaction::{Category, CategorySummary, Transaction};
use crate::statement::rules::parse_amount;

/// Column order of the CSV export.
pub const EXPORT_HEADER: [&str; 5] = ["Date", "Description", "Amount", "Category", "Source"];

/// One row of the CSV export, as text.
///
/// Amounts go through [`parse_amount`] rather than serde so that their scale
/// survives and out-of-range values are reported per row.
#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Source")]
    source: String,
}

/// All transactions of one processing run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

/// Rows read back from a CSV export.
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    pub transactions: Vec<Transaction>,
    pub diagnostics: Vec<Diagnostic>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Sum of every amount, `Total` transactions included. Zero when empty.
    pub fn grand_total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    /// Sum of the amounts that came from `source`.
    pub fn source_total(&self, source: &str) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.source == source)
            .map(|t| t.amount)
            .sum()
    }

    /// Per-category sums, counts and shares, largest total first.
    ///
    /// `Total` transactions are left out entirely. Categories with equal
    /// totals keep the order in which they first appear in the ledger.
    pub fn category_breakdown(&self) -> Vec<CategorySummary> {
        let mut summaries: Vec<CategorySummary> = Vec::new();

        for transaction in self.transactions.iter().filter(|t| t.category.is_spending()) {
            match summaries.iter_mut().find(|s| s.category == transaction.category) {
                Some(summary) => {
                    summary.total_amount += transaction.amount;
                    summary.count += 1;
                }
                None => summaries.push(CategorySummary {
                    category: transaction.category,
                    total_amount: transaction.amount,
                    count: 1,
                    percentage: Decimal::ZERO,
                }),
            }
        }

        let eligible: Decimal = summaries.iter().map(|s| s.total_amount).sum();
        if !eligible.is_zero() {
            for summary in &mut summaries {
                // round_dp rounds half to even
                summary.percentage =
                    (summary.total_amount / eligible * Decimal::ONE_HUNDRED).round_dp(1);
            }
        }

        summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
        summaries
    }

    /// Write every transaction as CSV with the [`EXPORT_HEADER`] columns.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(EXPORT_HEADER)?;

        for t in &self.transactions {
            let amount = t.amount.to_string();
            wtr.write_record([
                t.date_label.as_str(),
                t.description.as_str(),
                amount.as_str(),
                t.category.as_str(),
                t.source.as_str(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    /// CSV export as bytes.
    pub fn export_csv(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(buffer)
    }

    /// Read a file previously produced by [`write_csv`](Self::write_csv).
    ///
    /// Rows are taken as they are, including their `Source` column. A row
    /// with an unparseable amount is skipped with a diagnostic; an unknown
    /// category falls back to `Miscellaneous`.
    pub fn read_csv<R: Read>(reader: R, name: &str) -> Result<CsvImport> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let matches_export = headers.len() == EXPORT_HEADER.len()
            && headers
                .iter()
                .zip(EXPORT_HEADER)
                .all(|(found, expected)| found == expected);

        if !matches_export {
            return Err(ExtractionError::Unsupported(format!(
                "CSV header {:?} is not the export layout",
                headers.iter().collect::<Vec<_>>()
            ))
            .into());
        }

        let mut import = CsvImport::default();

        for (row, record) in rdr.deserialize::<ExportRow>().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    import.diagnostics.push(Diagnostic::warning(format!(
                        "{}: skipped row {}: {}",
                        name,
                        row + 1,
                        e
                    )));
                    continue;
                }
            };

            let Some(amount) = parse_amount(&record.amount) else {
                import.diagnostics.push(
                    Diagnostic::warning(format!(
                        "{}: skipped row {}, could not parse amount {:?}",
                        name,
                        row + 1,
                        record.amount
                    ))
                    .with_kind(DiagnosticKind::AmountParseFailure),
                );
                continue;
            };

            let category = record.category.parse::<Category>().unwrap_or_else(|e| {
                debug!("{}: row {}: {}", name, row + 1, e);
                Category::Miscellaneous
            });

            import.transactions.push(Transaction::new(
                record.date,
                record.description,
                amount,
                category,
                record.source,
            ));
        }

        debug!("{}: imported {} rows", name, import.transactions.len());
        Ok(import)
    }
}

impl Extend<Transaction> for TransactionLedger {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        self.transactions.extend(iter);
    }
}

impl FromIterator<Transaction> for TransactionLedger {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TransactionLedger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
