//! Regex patterns for payment statement extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Aggregate statement (Paytm): "Total Money Paid - Rs. 1,234.50"
    pub static ref AGGREGATE_TOTAL: Regex = Regex::new(
        r"(?i)Total Money Paid\s*-?\s*Rs\.?\s*([\d,]+(?:\.\d+)?)"
    ).unwrap();

    // Itemized statement (PhonePe): "INR 1,250.00"
    pub static ref ITEMIZED_AMOUNT: Regex = Regex::new(
        r"INR\s+([\d,]+\.?\d*)"
    ).unwrap();

    // Itemized payee line: "Paid to Cafe Mocha"
    pub static ref PAYEE: Regex = Regex::new(
        r"Paid to\s+([^\n]+)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_total_variants() {
        for text in [
            "Total Money Paid - Rs. 1,234.50",
            "Total Money Paid Rs 1,234.50",
            "TOTAL MONEY PAID -Rs.1,234.50",
        ] {
            let caps = AGGREGATE_TOTAL.captures(text).unwrap();
            assert_eq!(&caps[1], "1,234.50", "{}", text);
        }
    }

    #[test]
    fn test_aggregate_total_without_fraction() {
        let caps = AGGREGATE_TOTAL.captures("Total Money Paid - Rs. 500").unwrap();
        assert_eq!(&caps[1], "500");
    }

    #[test]
    fn test_itemized_amount_is_case_sensitive() {
        assert!(ITEMIZED_AMOUNT.is_match("Debit INR 250.00"));
        assert!(!ITEMIZED_AMOUNT.is_match("Debit inr 250.00"));
        assert!(!ITEMIZED_AMOUNT.is_match("INR250.00"));
    }

    #[test]
    fn test_payee_stops_at_line_end() {
        let caps = PAYEE.captures("Paid to Cafe Mocha\nINR 100.00").unwrap();
        assert_eq!(&caps[1], "Cafe Mocha");
    }
}
