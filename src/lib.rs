//! bomcheck: BOM order validation
//!
//! Validates order line items against part-number rules and a reference
//! catalog, then merges the local findings with an external anomaly
//! analysis into one consistent report.

pub mod cli;
pub mod core;
pub mod entities;
