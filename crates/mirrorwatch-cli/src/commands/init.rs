//! Init command implementation

use std::path::Path;

use colored::Colorize;

use mirrorwatch_core::Config;

use crate::error::Result;

/// Write the sample configuration, refusing to overwrite an existing file.
pub fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        println!(
            "{} Configuration already exists at {}",
            "OK".yellow().bold(),
            path.display().to_string().cyan()
        );
        return Ok(());
    }

    Config::write_sample(path)?;
    println!(
        "{} Wrote sample configuration to {}",
        "OK".green().bold(),
        path.display().to_string().cyan()
    );
    println!(
        "Edit it, then run {} to start watching.",
        "mirrorwatch run".cyan()
    );
    Ok(())
}
