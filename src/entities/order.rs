//! Order entity type - A customer BOM order and its line items

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::entities::lenient;

/// Order priority
///
/// An unrecognised priority in an order document reads as `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum Priority {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[default]
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!(
                "Invalid priority: {}. Use low, medium, or high",
                s
            )),
        }
    }
}

/// A single order line
///
/// Every field is optional on input. A missing or wrongly typed field is a
/// defect of the order, not a parse failure, so it is reported downstream as
/// an issue. Numeric identifiers are read as text and numeric strings as
/// numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Line identifier (should be unique within an order)
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub line_id: Option<String>,

    /// Part number, e.g. "PCB-X7700"
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub item_number: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<f64>,

    /// Unit price (absence is itself a defect)
    #[serde(
        default,
        deserialize_with = "lenient::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

impl Item {
    /// Build a fully populated line
    pub fn new(
        line_id: &str,
        item_number: &str,
        description: &str,
        quantity: f64,
        unit_price: Option<f64>,
        category: &str,
    ) -> Self {
        Self {
            line_id: Some(line_id.to_string()),
            item_number: Some(item_number.to_string()),
            description: Some(description.to_string()),
            quantity: Some(quantity),
            unit_price,
            category: Some(category.to_string()),
        }
    }

    /// Human-readable locator used in issue reports, e.g. "Line ID L004"
    pub fn location(&self) -> String {
        format!("Line ID {}", self.line_id.as_deref().unwrap_or("unknown"))
    }
}

/// A customer BOM order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
    #[serde(deserialize_with = "order_id")]
    pub order_id: String,

    #[serde(deserialize_with = "lenient::string")]
    pub customer: String,

    #[serde(deserialize_with = "lenient::string")]
    pub date: String,

    #[serde(deserialize_with = "lenient::or_default")]
    pub priority: Priority,

    /// Entries that are not objects are skipped
    #[serde(deserialize_with = "lenient::seq")]
    pub items: Vec<Item>,
}

fn order_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(lenient::opt_string(deserializer)?.unwrap_or_else(|| Order::default().order_id))
}

impl Default for Order {
    fn default() -> Self {
        Self {
            order_id: "unknown".to_string(),
            customer: String::new(),
            date: String::new(),
            priority: Priority::default(),
            items: Vec::new(),
        }
    }
}

/// Errors reading an order document
#[derive(Debug, Error, miette::Diagnostic)]
pub enum OrderError {
    #[error("Failed to read order file {path}: {source}")]
    #[diagnostic(code(bomcheck::order::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in order file {path}: {source}")]
    #[diagnostic(
        code(bomcheck::order::json),
        help("Orders are JSON objects with order_id, customer, date, priority and items")
    )]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Order {
    /// Parse an order from a JSON string
    pub fn from_json(content: &str, filename: &str) -> Result<Self, OrderError> {
        serde_json::from_str(content).map_err(|source| OrderError::Json {
            path: filename.to_string(),
            source,
        })
    }

    /// Load an order from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, OrderError> {
        let filename = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| OrderError::Io {
            path: filename.clone(),
            source,
        })?;
        Self::from_json(&content, &filename)
    }

    /// The built-in sample order
    ///
    /// The clean variant has three well-formed lines. The problematic variant
    /// appends a line without a unit price (L004), a connector missing its
    /// gender suffix (L005), and a line reusing the ID L003.
    pub fn sample(include_issues: bool) -> Self {
        let mut items = vec![
            Item::new("L001", "PCB-X7700", "Main Circuit Board", 5.0, Some(120.50), "Electronics"),
            Item::new("L002", "CAP-3300-10V", "10V Capacitor", 50.0, Some(0.75), "Components"),
            Item::new("L003", "RES-2K-0.25W", "2K Ohm Resistor", 100.0, Some(0.25), "Components"),
        ];

        if include_issues {
            items.push(Item::new("L004", "IC-8085", "Microprocessor", 2.0, None, "Electronics"));
            items.push(Item::new("L005", "CONN-7777", "DB9 Female Connector", 10.0, Some(1.20), "Connectors"));
            items.push(Item::new("L003", "DIODE-1N4001", "1A Diode", 25.0, Some(0.15), "Components"));
        }

        Self {
            order_id: "ORD-2025-7834".to_string(),
            customer: "Acme Electronics".to_string(),
            date: "2025-02-26".to_string(),
            priority: Priority::High,
            items,
        }
    }
}
