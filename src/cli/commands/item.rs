//! `bomcheck item` command - Validate individual item numbers

use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::helpers::{load_catalog, print_json};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::validator::ItemValidator;

#[derive(clap::Args, Debug)]
pub struct ItemArgs {
    /// Item numbers to validate
    #[arg(required = true)]
    pub item_numbers: Vec<String>,

    /// Reference catalog CSV (item_number,description,category)
    #[arg(long, env = "BOMCHECK_REFERENCE_FILE")]
    pub reference_file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ItemVerdict {
    item_number: String,
    valid: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

pub fn run(args: ItemArgs, global: &GlobalOpts) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| miette::miette!("Cannot determine working directory: {}", e))?;
    let config = Config::discover(global.config.as_deref(), &cwd).map_err(miette::Report::new)?;

    let reference_file = args.reference_file.as_deref().or(config.reference_file.as_deref());
    let validator = ItemValidator::new(load_catalog(reference_file));

    let verdicts: Vec<ItemVerdict> = args
        .item_numbers
        .iter()
        .map(|item_number| {
            let (valid, message) = validator.validate(item_number);
            let suggestion = if valid {
                None
            } else {
                validator.suggest_correction(item_number)
            };
            ItemVerdict {
                item_number: item_number.clone(),
                valid,
                message,
                suggestion,
            }
        })
        .collect();

    match global.format {
        OutputFormat::Json => print_json(&verdicts)?,
        OutputFormat::Csv => {
            let csv_err = |e: csv::Error| miette::miette!("Failed to write CSV: {}", e);
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer
                .write_record(["item_number", "valid", "message", "suggestion"])
                .map_err(csv_err)?;
            for v in &verdicts {
                writer
                    .write_record([
                        v.item_number.as_str(),
                        if v.valid { "true" } else { "false" },
                        v.message.as_str(),
                        v.suggestion.as_deref().unwrap_or(""),
                    ])
                    .map_err(csv_err)?;
            }
            writer
                .flush()
                .map_err(|e| miette::miette!("Failed to write CSV: {}", e))?;
        }
        _ => {
            for v in &verdicts {
                if v.valid {
                    println!("{} {}", style("✓").green(), v.item_number);
                } else {
                    println!("{} {} - {}", style("✗").red(), v.item_number, v.message);
                    if let Some(suggestion) = &v.suggestion {
                        println!("    suggested: {}", style(suggestion).cyan());
                    }
                }
            }
        }
    }

    let invalid = verdicts.iter().filter(|v| !v.valid).count();
    if invalid > 0 {
        Err(miette::miette!(
            "{} of {} item number(s) invalid",
            invalid,
            verdicts.len()
        ))
    } else {
        Ok(())
    }
}
