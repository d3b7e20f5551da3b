//! Transaction and category data models.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Spending category assigned to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Transport")]
    Transport,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Utilities")]
    Utilities,
    #[serde(rename = "Miscellaneous")]
    Miscellaneous,
    /// Whole-statement aggregate. Never part of a category breakdown.
    #[serde(rename = "Total")]
    Total,
}

impl Category {
    /// Every spending category, excluding the `Total` sentinel.
    pub const SPENDING: [Category; 9] = [
        Category::FoodAndDining,
        Category::Groceries,
        Category::Healthcare,
        Category::Transport,
        Category::Shopping,
        Category::Entertainment,
        Category::PersonalCare,
        Category::Utilities,
        Category::Miscellaneous,
    ];

    /// Display name, as used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Groceries => "Groceries",
            Self::Healthcare => "Healthcare",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::PersonalCare => "Personal Care",
            Self::Utilities => "Utilities",
            Self::Miscellaneous => "Miscellaneous",
            Self::Total => "Total",
        }
    }

    /// Whether this category takes part in category breakdowns.
    pub fn is_spending(&self) -> bool {
        !matches!(self, Self::Total)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::SPENDING
            .iter()
            .chain(std::iter::once(&Self::Total))
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// One parsed monetary event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    /// Real date or a synthetic label such as "Transaction 3".
    #[serde(rename = "Date")]
    pub date_label: String,

    /// Payee/merchant text, or a fixed literal when the source has none.
    #[serde(rename = "Description")]
    pub description: String,

    /// Non-negative amount in the statement currency.
    #[serde(rename = "Amount")]
    pub amount: Decimal,

    /// Assigned category.
    #[serde(rename = "Category")]
    pub category: Category,

    /// Name of the originating document.
    #[serde(rename = "Source")]
    pub source: String,
}

impl Transaction {
    pub fn new(
        date_label: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        category: Category,
        source: impl Into<String>,
    ) -> Self {
        Self {
            date_label: date_label.into(),
            description: description.into(),
            amount,
            category,
            source: source.into(),
        }
    }
}

/// Per-category aggregate, computed on demand from a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: Category,
    /// Sum of member transaction amounts.
    pub total_amount: Decimal,
    /// Number of member transactions.
    pub count: usize,
    /// Share of all non-`Total` spending, rounded to one decimal.
    pub percentage: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display_names() {
        assert_eq!(Category::FoodAndDining.to_string(), "Food & Dining");
        assert_eq!(Category::PersonalCare.to_string(), "Personal Care");
        assert_eq!(Category::Total.to_string(), "Total");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Food & Dining".parse::<Category>(), Ok(Category::FoodAndDining));
        assert_eq!(" utilities ".parse::<Category>(), Ok(Category::Utilities));
        assert_eq!("Total".parse::<Category>(), Ok(Category::Total));
        assert!("Rent".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_display_name() {
        let json = serde_json::to_string(&Category::PersonalCare).unwrap();
        assert_eq!(json, "\"Personal Care\"");

        let back: Category = serde_json::from_str("\"Food & Dining\"").unwrap();
        assert_eq!(back, Category::FoodAndDining);
    }

    #[test]
    fn test_total_is_not_spending() {
        assert!(!Category::Total.is_spending());
        assert!(Category::SPENDING.iter().all(|c| c.is_spending()));
    }
}
