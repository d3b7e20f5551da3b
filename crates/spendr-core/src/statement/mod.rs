//! Statement parsing: format detection, extraction and categorization.

pub mod aggregate;
pub mod categorizer;
pub mod format;
pub mod itemized;
mod parser;
pub mod rules;

pub use aggregate::extract_aggregate;
pub use categorizer::Categorizer;
pub use format::{detect, FormatDetector, FormatKind, FormatMatch, StatementFormat};
pub use itemized::{extract_itemized, ItemizedExtraction};
pub use parser::{ExtractionResult, RuleBasedParser, StatementParser};

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
