//! Run command implementation
//!
//! The foreground hosting loop: bootstrap the sample config if none exists,
//! validate, arm all monitors, park until Ctrl-C, then dispose.

use std::path::Path;
use std::sync::mpsc;

use colored::Colorize;

use mirrorwatch_core::{Config, validate_report};
use mirrorwatch_engine::{ExecutorSettings, Orchestrator};

use crate::error::{CliError, Result};

pub fn run_watch(path: &Path) -> Result<()> {
    if !path.exists() {
        Config::write_sample(path)?;
        println!(
            "{} No configuration found, wrote a sample to {}",
            "=>".blue().bold(),
            path.display().to_string().cyan()
        );
    }

    let config = Config::load(path)?.unwrap_or_default();
    let report = validate_report(&config.rules);
    for rejected in &report.rejected {
        println!(
            "   {} skipping {} {}: {}",
            "-".yellow(),
            rejected.rule.action,
            rejected.rule.source,
            rejected.reason.to_string().yellow()
        );
    }

    let settings = ExecutorSettings {
        retry: config.retry,
        program: config.tool.map(|t| t.program),
    };

    let mut orchestrator = Orchestrator::new();
    orchestrator.start(report.accepted, &settings);

    if orchestrator.armed() == 0 {
        println!(
            "{} No runnable rules. Nothing to run.",
            "OK".yellow().bold()
        );
        return Ok(());
    }

    println!(
        "{} Watching {} rule(s). Press Ctrl-C to stop.",
        "=>".green().bold(),
        orchestrator.armed()
    );

    let (tx, rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .map_err(|e| CliError::user(format!("Failed to install Ctrl-C handler: {e}")))?;

    let _ = rx.recv();

    println!("{} Stopping monitors...", "=>".blue().bold());
    orchestrator.dispose();
    println!("{} Stopped.", "OK".green().bold());
    Ok(())
}
