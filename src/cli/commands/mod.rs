//! CLI command implementations

pub mod check;
pub mod completions;
pub mod item;
pub mod reference;
pub mod sample;
