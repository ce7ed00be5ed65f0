use clap::Parser;
use miette::Result;
use tracing_subscriber::EnvFilter;

use bomcheck::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match cli.command {
        Commands::Check(args) => bomcheck::cli::commands::check::run(args, &cli.global),
        Commands::Item(args) => bomcheck::cli::commands::item::run(args, &cli.global),
        Commands::Reference(cmd) => bomcheck::cli::commands::reference::run(cmd, &cli.global),
        Commands::Sample(args) => bomcheck::cli::commands::sample::run(args),
        Commands::Completions(args) => bomcheck::cli::commands::completions::run(args),
    }
}

/// RUST_LOG wins; otherwise each -v raises the level one step
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bomcheck={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
