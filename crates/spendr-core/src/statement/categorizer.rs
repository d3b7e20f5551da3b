//! Keyword-based payee categorization.

use tracing::trace;

use crate::models::config::CategoryRules;
use crate::models::transaction::Category;

/// Maps free-text descriptions to a [`Category`].
///
/// Rules are tried in declaration order, and within a rule its keywords in
/// declaration order. The first category with any keyword contained in the
/// lower-cased description wins; nothing matching yields
/// [`Category::Miscellaneous`]. Categories overlap ("apple" is listed under
/// Entertainment), so the order of the table is part of its meaning.
#[derive(Debug, Clone, Default)]
pub struct Categorizer {
    rules: CategoryRules,
}

impl Categorizer {
    /// Keywords loaded from a config file may carry any case; they are
    /// lower-cased here.
    pub fn new(mut rules: CategoryRules) -> Self {
        for rule in rules.0.iter_mut() {
            for keyword in rule.keywords.iter_mut() {
                *keyword = keyword.to_lowercase();
            }
        }
        Self { rules }
    }

    pub fn rules(&self) -> &CategoryRules {
        &self.rules
    }

    pub fn categorize(&self, description: &str) -> Category {
        self.matching_rule(description)
            .map(|(category, _)| category)
            .unwrap_or(Category::Miscellaneous)
    }

    /// Like [`categorize`](Self::categorize), but also returns the keyword that matched.
    pub fn matching_rule(&self, description: &str) -> Option<(Category, &str)> {
        let description = description.to_lowercase();

        for rule in self.rules.iter() {
            if let Some(keyword) = rule.keywords.iter().find(|k| description.contains(k.as_str())) {
                trace!("{:?} matched keyword {:?} -> {}", description, keyword, rule.category);
                return Some((rule.category, keyword.as_str()));
            }
        }

        None
    }
}
