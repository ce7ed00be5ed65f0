//! Item validator - classify item numbers and propose corrections

use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::ReferenceCatalog;
use crate::core::patterns::{self, ItemPrefix};

/// Why an item number was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum ItemNumberError {
    #[error("Item number {item_number} does not match expected pattern {pattern}")]
    #[diagnostic(code(bomcheck::item::format))]
    FormatMismatch {
        item_number: String,
        pattern: &'static str,
    },

    #[error("Unknown item number prefix: {prefix}")]
    #[diagnostic(code(bomcheck::item::prefix))]
    UnknownPrefix { prefix: String },
}

/// Validates item numbers against the reference catalog and pattern rules
///
/// The catalog is shared, never copied. Cloning a validator is cheap.
#[derive(Debug, Clone, Default)]
pub struct ItemValidator {
    catalog: Arc<ReferenceCatalog>,
}

impl ItemValidator {
    pub fn new(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    /// A validator with an empty catalog (pattern rules only)
    pub fn pattern_only() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Check an item number
    ///
    /// Catalog membership wins over pattern rules. Otherwise the prefix
    /// before the first `-` selects the rule; an unknown prefix is rejected.
    pub fn check(&self, item_number: &str) -> Result<(), ItemNumberError> {
        if self.catalog.contains(item_number) {
            debug!(item_number, "found in reference catalog");
            return Ok(());
        }

        let prefix = patterns::prefix_of(item_number);
        match patterns::rule_for(prefix) {
            Some(rule) if rule.is_match(item_number) => {
                debug!(item_number, pattern = rule.pattern(), "matches pattern");
                Ok(())
            }
            Some(rule) => Err(ItemNumberError::FormatMismatch {
                item_number: item_number.to_string(),
                pattern: rule.pattern(),
            }),
            None => Err(ItemNumberError::UnknownPrefix {
                prefix: prefix.to_string(),
            }),
        }
    }

    /// Validate an item number, returning `(is_valid, message)`
    ///
    /// The message is empty for valid item numbers.
    pub fn validate(&self, item_number: &str) -> (bool, String) {
        match self.check(item_number) {
            Ok(()) => (true, String::new()),
            Err(e) => (false, e.to_string()),
        }
    }

    /// Propose a replacement for an item number
    ///
    /// Connectors missing a gender suffix get `-F` appended. Anything else
    /// gets the first catalog item (in catalog order) whose number contains
    /// the prefix. This is a first-match heuristic with no similarity
    /// ranking; an empty prefix matches the first catalog entry.
    pub fn suggest_correction(&self, item_number: &str) -> Option<String> {
        let prefix = patterns::prefix_of(item_number);

        if prefix == ItemPrefix::Conn.as_str()
            && !item_number.ends_with("-M")
            && !item_number.ends_with("-F")
        {
            return Some(format!("{}-F", item_number));
        }

        self.catalog.first_containing(prefix).map(str::to_string)
    }
}
