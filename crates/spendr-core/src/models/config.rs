//! Configuration structures for the statement pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::transaction::Category;
use crate::error::{Result, SpendrError};

/// Main configuration for the spendr pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpendrConfig {
    /// Keyword rules used to categorize payees.
    pub categories: CategoryRules,

    /// Statement extraction configuration.
    pub extraction: ExtractionConfig,

    /// CSV export configuration.
    pub export: ExportConfig,
}

/// One entry of the category table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }
}

/// Ordered category table. Earlier rules win when several match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRules(pub Vec<CategoryRule>);

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryRule> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check that no rule targets the `Total` sentinel and no keyword is blank.
    pub fn validate(&self) -> Result<()> {
        for rule in &self.0 {
            if rule.category == Category::Total {
                return Err(SpendrError::Config(
                    "category rules cannot target Total".to_string(),
                ));
            }
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(SpendrError::Config(format!(
                    "empty keyword in rules for {}",
                    rule.category
                )));
            }
        }
        Ok(())
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self(vec![
            CategoryRule::new(
                Category::FoodAndDining,
                [
                    "canteen", "restaurant", "cafe", "zomato", "swiggy", "food", "tea", "coffee",
                    "irani", "sweet", "bakery", "caterers",
                ],
            ),
            CategoryRule::new(
                Category::Groceries,
                ["market", "store", "provision", "blinkit", "grocery", "vegetables", "fruits"],
            ),
            CategoryRule::new(
                Category::Healthcare,
                [
                    "medical", "hospital", "pharmacy", "wellness", "clinic", "doctor", "medicine",
                    "healthcare",
                ],
            ),
            CategoryRule::new(
                Category::Transport,
                ["uber", "ola", "taxi", "auto", "metro", "bus", "petrol", "fuel"],
            ),
            CategoryRule::new(
                Category::Shopping,
                [
                    "amazon", "flipkart", "myntra", "mall", "shop", "retail", "zone", "enterprise",
                    "honeybee",
                ],
            ),
            CategoryRule::new(
                Category::Entertainment,
                ["movie", "cinema", "netflix", "prime", "spotify", "apple", "youtube", "game"],
            ),
            CategoryRule::new(
                Category::PersonalCare,
                ["salon", "spa", "barber", "beauty", "style"],
            ),
            CategoryRule::new(
                Category::Utilities,
                [
                    "electricity", "water", "gas", "recharge", "mobile", "internet", "telecom",
                    "phone", "bhakti",
                ],
            ),
        ])
    }
}

/// Literal labels used when a statement format carries no detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Date label of the aggregate-total transaction.
    pub aggregate_date_label: String,

    /// Description of the aggregate-total transaction.
    pub aggregate_description: String,

    /// Description used when an itemized amount has no payee.
    pub unknown_payee: String,

    /// Currency prefix used in human-readable amounts.
    pub currency_symbol: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            aggregate_date_label: "Paytm Total".to_string(),
            aggregate_description: "Paytm Statement".to_string(),
            unknown_payee: "Unknown".to_string(),
            currency_symbol: "Rs.".to_string(),
        }
    }
}

/// CSV export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File name used when no export path is given.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "expenses.csv".to_string(),
        }
    }
}

impl SpendrConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.categories.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_rules_order() {
        let rules = CategoryRules::default();
        let order: Vec<Category> = rules.iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::FoodAndDining,
                Category::Groceries,
                Category::Healthcare,
                Category::Transport,
                Category::Shopping,
                Category::Entertainment,
                Category::PersonalCare,
                Category::Utilities,
            ]
        );
    }

    #[test]
    fn test_rule_keywords_are_lowercased() {
        let rule = CategoryRule::new(Category::Shopping, ["IKEA", "Decathlon"]);
        assert_eq!(rule.keywords, vec!["ikea", "decathlon"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SpendrConfig =
            serde_json::from_str(r#"{"extraction": {"unknown_payee": "N/A"}}"#).unwrap();
        assert_eq!(config.extraction.unknown_payee, "N/A");
        assert_eq!(config.extraction.aggregate_description, "Paytm Statement");
        assert_eq!(config.categories, CategoryRules::default());
    }

    #[test]
    fn test_rules_serialize_as_list() {
        let rules = CategoryRules::new(vec![CategoryRule::new(Category::Transport, ["rapido"])]);
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, r#"[{"category":"Transport","keywords":["rapido"]}]"#);
    }

    #[test]
    fn test_validate_rejects_total_rule() {
        let rules = CategoryRules::new(vec![CategoryRule::new(Category::Total, ["sum"])]);
        assert!(rules.validate().is_err());
        assert!(CategoryRules::default().validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SpendrConfig::default();
        config.export.file_name = "march.csv".to_string();
        config.save(&path).unwrap();

        let loaded = SpendrConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
