//! `bomcheck sample` command - Emit the built-in sample order

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::entities::order::Order;

#[derive(clap::Args, Debug)]
pub struct SampleArgs {
    /// Clean order without deliberate issues
    #[arg(long, short = 'c')]
    pub clean: bool,

    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: SampleArgs) -> Result<()> {
    let order = Order::sample(!args.clean);
    let json = serde_json::to_string_pretty(&order)
        .map_err(|e| miette::miette!("Failed to serialize sample: {}", e))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            println!(
                "{} Saved {} sample order {} to {}",
                style("✓").green(),
                if args.clean { "clean" } else { "problematic" },
                style(&order.order_id).cyan(),
                path.display()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
