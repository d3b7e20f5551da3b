//! Aggregate-total statements: one summary amount per document.

use tracing::debug;

use super::rules::parse_amount;
use super::Result;
use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::transaction::{Category, Transaction};

/// Build the single `Total` transaction from the matched total amount.
///
/// A total that does not parse fails the whole document; there is nothing
/// else in this layout to fall back on.
pub fn extract_aggregate(amount_text: &str, source: &str, config: &ExtractionConfig) -> Result<Transaction> {
    let amount = parse_amount(amount_text).ok_or_else(|| ExtractionError::AmountParse {
        value: amount_text.to_string(),
    })?;

    debug!("{}: aggregate total {}", source, amount);

    Ok(Transaction::new(
        config.aggregate_date_label.as_str(),
        config.aggregate_description.as_str(),
        amount,
        Category::Total,
        source,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_extract_aggregate() {
        let tx = extract_aggregate("1,234.50", "paytm.pdf", &ExtractionConfig::default()).unwrap();
        assert_eq!(
            tx,
            Transaction {
                date_label: "Paytm Total".to_string(),
                description: "Paytm Statement".to_string(),
                amount: Decimal::from_str("1234.50").unwrap(),
                category: Category::Total,
                source: "paytm.pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_extract_aggregate_bad_amount() {
        let err = extract_aggregate(",,", "paytm.pdf", &ExtractionConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::AmountParse { ref value } if value == ",,"));
    }

    #[test]
    fn test_extract_aggregate_uses_config_labels() {
        let config = ExtractionConfig {
            aggregate_date_label: "March".to_string(),
            aggregate_description: "Wallet".to_string(),
            ..ExtractionConfig::default()
        };
        let tx = extract_aggregate("10", "a.pdf", &config).unwrap();
        assert_eq!(tx.date_label, "March");
        assert_eq!(tx.description, "Wallet");
    }
}
