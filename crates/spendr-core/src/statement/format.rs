//! Statement format detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::patterns::AGGREGATE_TOTAL;
use super::rules::{AmountExtractor, FieldExtractor};

/// Supported statement layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// One summary total for the whole statement (Paytm).
    AggregateTotal,
    /// A list of individual payments (PhonePe).
    ItemizedList,
}

impl FormatKind {
    /// Vendor name shown in diagnostics.
    pub fn vendor(&self) -> &'static str {
        match self {
            Self::AggregateTotal => "Paytm",
            Self::ItemizedList => "PhonePe",
        }
    }
}

/// What a format matched in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatMatch {
    /// Raw numeric text of the summary total.
    AggregateTotal { amount_text: String },
    /// Raw numeric text of every amount marker, in order.
    ItemizedList { amount_texts: Vec<String> },
}

impl FormatMatch {
    pub fn kind(&self) -> FormatKind {
        match self {
            Self::AggregateTotal { .. } => FormatKind::AggregateTotal,
            Self::ItemizedList { .. } => FormatKind::ItemizedList,
        }
    }
}

/// A statement layout that can recognize itself in extracted text.
pub trait StatementFormat: Send + Sync {
    fn kind(&self) -> FormatKind;

    fn try_match(&self, text: &str) -> Option<FormatMatch>;
}

/// "Total Money Paid - Rs. <amount>".
pub struct AggregateTotalFormat;

impl StatementFormat for AggregateTotalFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::AggregateTotal
    }

    fn try_match(&self, text: &str) -> Option<FormatMatch> {
        AGGREGATE_TOTAL.captures(text).map(|caps| FormatMatch::AggregateTotal {
            amount_text: caps[1].to_string(),
        })
    }
}

/// One or more "INR <amount>" markers.
pub struct ItemizedListFormat;

impl StatementFormat for ItemizedListFormat {
    fn kind(&self) -> FormatKind {
        FormatKind::ItemizedList
    }

    fn try_match(&self, text: &str) -> Option<FormatMatch> {
        let amount_texts: Vec<String> = AmountExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();

        if amount_texts.is_empty() {
            None
        } else {
            Some(FormatMatch::ItemizedList { amount_texts })
        }
    }
}

/// Tries formats in priority order and stops at the first match.
///
/// The aggregate total comes first: a statement carrying the total marker is
/// treated as aggregate even if it also contains itemized amounts.
pub struct FormatDetector {
    formats: Vec<Box<dyn StatementFormat>>,
}

impl FormatDetector {
    pub fn new(formats: Vec<Box<dyn StatementFormat>>) -> Self {
        Self { formats }
    }

    pub fn detect(&self, text: &str) -> Option<FormatMatch> {
        let found = self.formats.iter().find_map(|format| format.try_match(text));
        debug!(
            "Format detection over {} chars -> {:?}",
            text.len(),
            found.as_ref().map(FormatMatch::kind)
        );
        found
    }
}

impl Default for FormatDetector {
    fn default() -> Self {
        Self::new(vec![Box::new(AggregateTotalFormat), Box::new(ItemizedListFormat)])
    }
}

/// Detect the format of `text` with the default priority order.
pub fn detect(text: &str) -> Option<FormatMatch> {
    FormatDetector::default().detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_detect_aggregate() {
        let found = detect("Paytm Statement\nTotal Money Paid - Rs. 1,234.50\n");
        assert_eq!(
            found,
            Some(FormatMatch::AggregateTotal {
                amount_text: "1,234.50".to_string()
            })
        );
    }

    #[test]
    fn test_detect_itemized() {
        let found = detect("Paid to A\nINR 100.00\nINR 50");
        assert_eq!(
            found,
            Some(FormatMatch::ItemizedList {
                amount_texts: vec!["100.00".to_string(), "50".to_string()]
            })
        );
    }

    #[test]
    fn test_aggregate_takes_precedence() {
        let text = "INR 10.00\nTotal Money Paid - Rs. 10\nINR 20.00";
        assert_eq!(detect(text).map(|m| m.kind()), Some(FormatKind::AggregateTotal));
    }

    #[test]
    fn test_detect_nothing() {
        assert_eq!(detect("Bank of Nowhere\nBalance 100"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_custom_priority() {
        let detector = FormatDetector::new(vec![Box::new(ItemizedListFormat)]);
        let text = "Total Money Paid - Rs. 10\nINR 20.00";
        assert_eq!(detector.detect(text).map(|m| m.kind()), Some(FormatKind::ItemizedList));
    }

    #[test]
    fn test_vendor_names() {
        assert_eq!(FormatKind::AggregateTotal.vendor(), "Paytm");
        assert_eq!(AggregateTotalFormat.kind(), FormatKind::AggregateTotal);
        assert_eq!(ItemizedListFormat.kind(), FormatKind::ItemizedList);
    }
}
