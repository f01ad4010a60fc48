//! mirrorwatch CLI
//!
//! Foreground runner for the watch-and-synchronize engine.

mod cli;
mod commands;
mod error;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Validate) => {
            let path = commands::config_path(cli.config)?;
            commands::run_validate(&path)
        }
        Some(Commands::Run) => {
            let path = commands::config_path(cli.config)?;
            commands::run_watch(&path)
        }
        Some(Commands::Init) => {
            let path = commands::config_path(cli.config)?;
            commands::run_init(&path)
        }
        Some(Commands::Completions { shell }) => {
            generate(
                shell,
                &mut Cli::command(),
                "mirrorwatch",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => {
            println!(
                "{} Keep directory pairs synchronized",
                "mirrorwatch".green().bold()
            );
            println!();
            println!(
                "Run {} for available commands.",
                "mirrorwatch --help".cyan()
            );
            Ok(())
        }
    }
}

/// `-v` raises the default level to DEBUG; `RUST_LOG` overrides either way.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
