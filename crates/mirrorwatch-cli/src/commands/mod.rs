//! Command implementations for mirrorwatch-cli

pub mod init;
pub mod run;
pub mod validate;

use std::path::PathBuf;

use mirrorwatch_core::Config;

use crate::error::Result;

pub use init::run_init;
pub use run::run_watch;
pub use validate::run_validate;

/// Resolve the config file location: explicit flag, or the platform default.
pub fn config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => Ok(Config::default_path()?),
    }
}
