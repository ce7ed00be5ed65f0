//! `bomcheck reference` command - Reference catalog management

use clap::Subcommand;
use console::style;
use miette::Result;
use serde::Serialize;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{print_json, truncate_str};
use crate::cli::output::effective_format;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::ReferenceCatalog;

#[derive(Subcommand, Debug)]
pub enum ReferenceCommands {
    /// Write the sample reference dataset to a CSV file
    Generate(GenerateArgs),

    /// List the entries of a reference CSV file
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Output CSV path
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Reference CSV path
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
struct EntryRow {
    #[tabled(rename = "ITEM NUMBER")]
    item_number: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
}

pub fn run(cmd: ReferenceCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReferenceCommands::Generate(args) => run_generate(args),
        ReferenceCommands::Show(args) => run_show(args, global),
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(miette::miette!(
            help = "Use --force to overwrite",
            "{} already exists",
            args.path.display()
        ));
    }

    let rows = ReferenceCatalog::generate_sample(&args.path).map_err(miette::Report::new)?;
    println!(
        "{} Generated {} reference items in {}",
        style("✓").green(),
        style(rows).cyan(),
        args.path.display()
    );
    println!(
        "   Use {} to validate against it",
        style(format!("--reference-file {}", args.path.display())).yellow()
    );
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let (catalog, summary) = ReferenceCatalog::from_file(&args.path).map_err(miette::Report::new)?;

    let rows: Vec<EntryRow> = catalog
        .iter()
        .map(|e| EntryRow {
            item_number: e.item_number.clone(),
            description: e.description.clone(),
            category: e.category.clone(),
        })
        .collect();

    match effective_format(global.format, true) {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => {
            catalog.write_csv(std::io::stdout()).map_err(miette::Report::new)?;
        }
        OutputFormat::Text => {
            for row in &rows {
                println!(
                    "{:<16} {:<30} {}",
                    style(&row.item_number).cyan(),
                    truncate_str(&row.description, 30),
                    row.category
                );
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
    }

    if summary.skipped > 0 {
        eprintln!(
            "{} {} malformed row(s) skipped",
            style("!").yellow().bold(),
            summary.skipped
        );
    }
    Ok(())
}
