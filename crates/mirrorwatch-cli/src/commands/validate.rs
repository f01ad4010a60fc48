//! Validate command implementation

use std::path::Path;

use colored::Colorize;

use mirrorwatch_core::{Config, validate_report};

use crate::error::Result;

/// Load the config, run validation, and report every decision.
///
/// Exit is always clean: rejections and an empty runnable set are findings,
/// not failures.
pub fn run_validate(path: &Path) -> Result<()> {
    let Some(config) = Config::load(path)? else {
        println!(
            "{} No configuration found at {}",
            "=>".blue().bold(),
            path.display().to_string().cyan()
        );
        println!("Run {} to create one.", "mirrorwatch init".cyan());
        return Ok(());
    };

    println!(
        "{} Validating {} rule(s) from {}",
        "=>".blue().bold(),
        config.rules.len(),
        path.display().to_string().cyan()
    );

    let report = validate_report(&config.rules);

    for rule in &report.accepted {
        println!(
            "   {} {} {} {} {}",
            "+".green(),
            rule.mode.to_string().green().bold(),
            rule.source.display(),
            "->".dimmed(),
            rule.destination.display()
        );
    }
    for rejected in &report.rejected {
        println!(
            "   {} {} {} {} {}: {}",
            "-".yellow(),
            rejected.rule.action.yellow().bold(),
            rejected.rule.source,
            "->".dimmed(),
            rejected.rule.destination,
            rejected.reason.to_string().yellow()
        );
    }

    if report.accepted.is_empty() {
        println!();
        println!("{} No runnable rules. Nothing to run.", "OK".yellow().bold());
    } else {
        println!();
        println!(
            "{} {} runnable rule(s), {} rejected.",
            "OK".green().bold(),
            report.accepted.len(),
            report.rejected.len()
        );
    }

    Ok(())
}
