//! Order validator - run item checks over every line of an order

use tracing::debug;

use crate::core::validator::ItemValidator;
use crate::entities::issue::{Issue, Severity};
use crate::entities::order::Order;

/// Issue tag for item numbers rejected by local validation
pub const INVALID_ITEM_NUMBER: &str = "Invalid Item Number";

const RECOMMENDATION: &str = "Check and correct item number format";

/// Produces local issues for an order
///
/// Only item-number format and reference checks run here. Missing fields
/// and duplicate line IDs are left to the external analyzer.
#[derive(Debug, Clone, Default)]
pub struct OrderValidator {
    items: ItemValidator,
}

impl OrderValidator {
    pub fn new(items: ItemValidator) -> Self {
        Self { items }
    }

    pub fn item_validator(&self) -> &ItemValidator {
        &self.items
    }

    /// Validate each line in order, returning issues in line order
    ///
    /// Lines without an item number are skipped.
    pub fn validate_order(&self, order: &Order) -> Vec<Issue> {
        let mut issues = Vec::new();

        for item in &order.items {
            let Some(item_number) = item.item_number.as_deref() else {
                continue;
            };

            let (is_valid, message) = self.items.validate(item_number);
            if is_valid {
                continue;
            }

            let recommendation = match self.items.suggest_correction(item_number) {
                Some(suggestion) => format!("{} (suggested: {})", RECOMMENDATION, suggestion),
                None => RECOMMENDATION.to_string(),
            };

            issues.push(Issue::new(
                INVALID_ITEM_NUMBER,
                item.location(),
                message,
                Severity::Medium,
                recommendation,
            ));
        }

        debug!(
            order_id = %order.order_id,
            lines = order.items.len(),
            issues = issues.len(),
            "local validation complete"
        );
        issues
    }
}
