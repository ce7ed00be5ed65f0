//! `bomcheck check` command - Validate an order and report combined issues

use console::style;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::cli::helpers::{load_catalog, print_json};
use crate::cli::output::{effective_format, issue_table, print_text_report};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::analysis::{Analyzer, CommandAnalyzer, FileAnalyzer};
use crate::core::config::Config;
use crate::core::order_validator::OrderValidator;
use crate::core::reconcile::reconcile;
use crate::core::report;
use crate::core::validator::ItemValidator;
use crate::entities::issue::AnalysisResult;
use crate::entities::order::Order;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Order JSON file (default: the built-in problematic sample)
    #[arg(long, short = 'i', conflicts_with_all = ["sample", "clean"])]
    pub input: Option<PathBuf>,

    /// Use the built-in sample order with deliberate issues
    #[arg(long, short = 's')]
    pub sample: bool,

    /// Use the built-in clean sample order
    #[arg(long, conflicts_with = "sample")]
    pub clean: bool,

    /// Save the generated sample order to a file
    #[arg(long, conflicts_with = "input")]
    pub save_sample: Option<PathBuf>,

    /// Reference catalog CSV (item_number,description,category)
    #[arg(long, env = "BOMCHECK_REFERENCE_FILE")]
    pub reference_file: Option<PathBuf>,

    /// Pre-computed external analysis JSON
    #[arg(long, conflicts_with = "analyzer_cmd")]
    pub analysis: Option<PathBuf>,

    /// External analyzer program and its arguments; receives the order JSON
    /// on stdin. Takes every following argument, so pass it last
    #[arg(
        long,
        value_name = "PROGRAM",
        num_args = 1..,
        allow_hyphen_values = true
    )]
    pub analyzer_cmd: Option<Vec<String>>,

    /// Skip local item validation (report external analysis only)
    #[arg(long, overrides_with = "local_validation")]
    pub skip_local_validation: bool,

    /// Run local item validation even if the config skips it
    #[arg(long, overrides_with = "skip_local_validation")]
    pub local_validation: bool,

    /// Save the combined analysis as JSON
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Append the combined analysis to a CSV report
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl CheckArgs {
    fn load_order(&self) -> Result<Order> {
        match &self.input {
            Some(path) => {
                eprintln!("{} Loading order data from {}", style("→").blue(), path.display());
                Order::from_file(path).map_err(miette::Report::new)
            }
            None => {
                let order = Order::sample(!self.clean);
                eprintln!(
                    "{} Using {} sample order {}",
                    style("→").blue(),
                    if self.clean { "clean" } else { "problematic" },
                    order.order_id
                );
                Ok(order)
            }
        }
    }

    fn analyzer(&self, config: &Config) -> Box<dyn Analyzer> {
        if let Some(path) = &self.analysis {
            return Box::new(FileAnalyzer::new(path.clone()));
        }
        let command = self.analyzer_cmd.as_deref().and_then(<[String]>::split_first);
        if let Some((program, args)) = command {
            return Box::new(CommandAnalyzer::new(program.clone(), args.to_vec()));
        }
        config.analyzer.build()
    }

    fn skip_local(&self, config: &Config) -> bool {
        if self.local_validation {
            return false;
        }
        self.skip_local_validation || config.skip_local_validation
    }
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|e| miette::miette!("Cannot determine working directory: {}", e))?;
    let config = Config::discover(global.config.as_deref(), &cwd).map_err(miette::Report::new)?;

    let order = args.load_order()?;
    if let Some(path) = &args.save_sample {
        let json = serde_json::to_string_pretty(&order)
            .map_err(|e| miette::miette!("Failed to serialize sample: {}", e))?;
        std::fs::write(path, json + "\n")
            .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
        eprintln!("{} Sample data saved to {}", style("✓").green(), path.display());
    }

    let reference_file = args.reference_file.as_deref().or(config.reference_file.as_deref());
    let catalog = load_catalog(reference_file);

    let local_issues = if args.skip_local(&config) {
        Vec::new()
    } else {
        OrderValidator::new(ItemValidator::new(catalog)).validate_order(&order)
    };

    let analyzer = args.analyzer(&config);
    let external = analyzer.analyze(&order);
    if let Err(e) = &external {
        warn!(analyzer = analyzer.name(), "external analysis failed: {}", e);
        eprintln!(
            "{} External analysis unavailable: {}",
            style("!").yellow().bold(),
            e
        );
    }

    let result = reconcile(local_issues, external);

    match effective_format(global.format, false) {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Csv => {
            let timestamp = now();
            let rows = report::rows(&order.order_id, &result, &timestamp);
            report::write_csv(std::io::stdout(), &rows, true).map_err(miette::Report::new)?;
        }
        OutputFormat::Table => {
            if result.is_empty() {
                print_text_report(&result);
            } else {
                println!("{}", issue_table(&result));
            }
        }
        OutputFormat::Text | OutputFormat::Auto => print_text_report(&result),
    }

    if let Some(path) = &args.output {
        report::write_json(path, &result).map_err(miette::Report::new)?;
        eprintln!("{} Analysis results saved to {}", style("✓").green(), path.display());
    }

    if let Some(path) = args.csv.as_deref().or(config.csv_report.as_deref()) {
        save_csv(path, &order.order_id, &result)?;
    }

    Ok(())
}

fn save_csv(path: &Path, order_id: &str, result: &AnalysisResult) -> Result<()> {
    report::append_csv(path, order_id, result, &now()).map_err(miette::Report::new)?;
    eprintln!("{} Analysis saved to CSV: {}", style("✓").green(), path.display());
    Ok(())
}

fn now() -> String {
    chrono::Local::now().format(report::TIMESTAMP_FORMAT).to_string()
}
