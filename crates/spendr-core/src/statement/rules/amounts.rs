//! Amount extraction and formatting for statements.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::ITEMIZED_AMOUNT;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts the raw text of every `INR <amount>` marker, in document order.
///
/// Values are left unparsed so a malformed item can be skipped on its own.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        ITEMIZED_AMOUNT
            .captures_iter(text)
            .filter_map(|caps| {
                let full_match = caps.get(0)?;
                Some(
                    ExtractionMatch::new(caps[1].to_string(), full_match.as_str())
                        .with_position(full_match.start(), full_match.end()),
                )
            })
            .collect()
    }
}

/// Largest amount a single statement line may carry (10^15).
///
/// Bounding every item keeps ledger sums far inside `Decimal`'s range, so
/// totals over any realistic number of transactions cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Parse a statement amount such as "1,234.50", "50" or "1,000.".
///
/// Negative amounts and amounts above [`MAX_AMOUNT`] are rejected.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(cleaned)
        .ok()
        .filter(|d| !d.is_sign_negative() && *d <= MAX_AMOUNT)
}

/// Format an amount for display, e.g. `Rs.1,234.50`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let s = format!("{:.2}", amount.round_dp(2));
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{}{}{}.{}", sign, symbol, grouped, decimal_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,234.50"), Some(dec("1234.50")));
        assert_eq!(parse_amount("50"), Some(dec("50")));
        assert_eq!(parse_amount("1,00,000"), Some(dec("100000")));
        assert_eq!(parse_amount("1,000."), Some(dec("1000")));
    }

    #[test]
    fn test_parse_amount_keeps_scale() {
        assert_eq!(parse_amount("100.00").unwrap().to_string(), "100.00");
        assert_eq!(parse_amount("50").unwrap().to_string(), "50");
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(",,,"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("-5"), None);
    }

    #[test]
    fn test_parse_amount_rejects_out_of_range() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000000"));
        assert_eq!(parse_amount("1,000,000,000,000,000"), Some(MAX_AMOUNT));
        assert_eq!(parse_amount("1000000000000000.01"), None);
        assert_eq!(parse_amount("50000000000000000000000000000"), None);
        assert_eq!(parse_amount("999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234.5"), "Rs."), "Rs.1,234.50");
        assert_eq!(format_amount(dec("12345678.9"), "Rs."), "Rs.12,345,678.90");
        assert_eq!(format_amount(dec("0"), "Rs."), "Rs.0.00");
        assert_eq!(format_amount(dec("999"), ""), "999.00");
    }

    #[test]
    fn test_extract_all_amounts() {
        let extractor = AmountExtractor::new();
        let text = "Paid to A\nDebit INR 100.00\nPaid to B\nDebit INR 1,250";

        let results = extractor.extract_all(text);
        let values: Vec<&str> = results.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["100.00", "1,250"]);
        assert_eq!(results[0].source, "INR 100.00");
        assert!(results[0].position.unwrap().0 < results[1].position.unwrap().0);
    }
}
