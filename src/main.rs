//! A font patcher built with Rust, norad, and the Linebender crates.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use glyphpatch::cli::CliArgs;
use glyphpatch::runner;

/// Run a full patch batch with the given CLI arguments.
fn run_patcher(cli_args: CliArgs) -> Result<()> {
    runner::run(cli_args)
}

fn main() {
    let default_filter = if std::env::args().any(|a| a == "-q" || a == "--quiet") {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let cli_args = CliArgs::parse();
    if let Err(message) = cli_args.validate() {
        eprintln!("{message}");
        std::process::exit(2);
    }

    match run_patcher(cli_args) {
        Ok(()) => {}
        Err(error) => {
            eprintln!();
            eprintln!("Error while patching:");
            eprintln!("{error:#}");
            eprintln!();
            eprintln!("Try running with --help for usage information.");
            std::process::exit(1);
        }
    }
}
