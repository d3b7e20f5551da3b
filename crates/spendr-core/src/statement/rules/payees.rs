//! Payee name extraction and positional pairing.

use super::patterns::PAYEE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts every `Paid to <name>` line, trimmed, in document order.
pub struct PayeeExtractor;

impl PayeeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PayeeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PayeeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PAYEE
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(caps[1].trim().to_string(), full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Pair the i-th amount with the i-th payee.
///
/// Amounts without a payee at the same index get `default`. Extra payees are
/// ignored. No attempt is made to realign sequences of different lengths.
pub fn pair_positionally<'a, A, P>(amounts: &'a [A], payees: &'a [P], default: &'a str) -> Vec<(&'a A, &'a str)>
where
    P: AsRef<str>,
{
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let payee = payees.get(i).map(|p| p.as_ref()).unwrap_or(default);
            (amount, payee)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_payees() {
        let text = "Paid to   Cafe Mocha  \r\nINR 10\nPaid to Uber India\nINR 20";
        let payees: Vec<String> = PayeeExtractor::new()
            .extract_all(text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        assert_eq!(payees, vec!["Cafe Mocha", "Uber India"]);
    }

    #[test]
    fn test_pair_equal_lengths() {
        let amounts = ["10", "20"];
        let payees = ["A", "B"];
        let pairs = pair_positionally(&amounts, &payees, "Unknown");
        assert_eq!(pairs, vec![(&"10", "A"), (&"20", "B")]);
    }

    #[test]
    fn test_pair_missing_payees_fall_back() {
        let amounts = ["10", "20", "30"];
        let payees = ["A"];
        let pairs = pair_positionally(&amounts, &payees, "Unknown");
        assert_eq!(pairs, vec![(&"10", "A"), (&"20", "Unknown"), (&"30", "Unknown")]);
    }

    #[test]
    fn test_pair_extra_payees_ignored() {
        let amounts = ["10"];
        let payees = ["A", "B", "C"];
        let pairs = pair_positionally(&amounts, &payees, "Unknown");
        assert_eq!(pairs, vec![(&"10", "A")]);
    }

    #[test]
    fn test_pair_no_amounts() {
        let amounts: [&str; 0] = [];
        let payees = ["A"];
        assert!(pair_positionally(&amounts, &payees, "Unknown").is_empty());
    }
}
