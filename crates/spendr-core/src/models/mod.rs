//! Data models and configuration.

pub mod config;
pub mod document;
pub mod transaction;

pub use config::{CategoryRule, CategoryRules, ExportConfig, ExtractionConfig, SpendrConfig};
pub use document::{Document, DocumentKind};
pub use transaction::{Category, CategorySummary, Transaction};
