//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// mirrorwatch - keep directory pairs synchronized on change
#[derive(Parser, Debug)]
#[command(name = "mirrorwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the configured watch rules without starting any monitor
    ///
    /// Prints each runnable rule and each rejection with its cause. An
    /// empty runnable set is not an error: there is just nothing to run.
    Validate,

    /// Watch all configured rules until interrupted
    ///
    /// Writes a sample configuration first if none exists, validates the
    /// rules, arms one monitor per runnable rule, and stops on Ctrl-C.
    Run,

    /// Write a sample configuration file
    ///
    /// Creates the file with a default retry policy and one Mirror rule,
    /// plus the sample directories it points at. Never overwrites.
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::parse_from(["mirrorwatch", "validate", "--config", "/tmp/mw.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/mw.toml")));
        assert_eq!(cli.command, Some(Commands::Validate));
    }

    #[test]
    fn verbose_flag_parses() {
        let cli = Cli::parse_from(["mirrorwatch", "-v", "run"]);
        assert!(cli.verbose);
        assert_eq!(cli.command, Some(Commands::Run));
    }
}
