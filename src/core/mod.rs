//! Core module - validation engine, reconciliation, and report sinks

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod order_validator;
pub mod patterns;
pub mod reconcile;
pub mod report;
pub mod validator;

pub use analysis::{AnalysisError, Analyzer, CommandAnalyzer, FileAnalyzer, Unconfigured};
pub use catalog::{CatalogEntry, CatalogError, LoadSummary, ReferenceCatalog};
pub use config::{AnalyzerConfig, Config, ConfigError};
pub use order_validator::OrderValidator;
pub use patterns::{rule_for, ItemPrefix, PatternRule};
pub use reconcile::reconcile;
pub use report::ReportError;
pub use validator::{ItemNumberError, ItemValidator};
