//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, item::ItemArgs,
    reference::ReferenceCommands, sample::SampleArgs,
};

/// bomcheck - Validate BOM order line items
///
/// Checks item numbers against part-number rules and a reference catalog,
/// merges the result with an external anomaly analysis, and reports one
/// combined issue list.
#[derive(Parser, Debug)]
#[command(name = "bomcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file (default: ./bomcheck.yaml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output formats
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Text for single results, table for lists
    #[default]
    Auto,
    /// Human-readable report
    Text,
    /// JSON document
    Json,
    /// CSV rows
    Csv,
    /// Bordered table
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate an order and report combined issues
    Check(CheckArgs),

    /// Validate one or more item numbers
    Item(ItemArgs),

    /// Reference catalog operations
    #[command(subcommand)]
    Reference(ReferenceCommands),

    /// Print or save the built-in sample order
    Sample(SampleArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
