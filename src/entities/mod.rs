//! Entity type definitions

pub mod issue;
pub mod lenient;
pub mod order;

pub use issue::{AnalysisResult, Issue, Severity};
pub use order::{Item, Order, OrderError, Priority};
