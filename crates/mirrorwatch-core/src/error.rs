//! Error types for mirrorwatch-core

use std::path::PathBuf;

/// Result type for mirrorwatch-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mirrorwatch-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Undefined action: {action}")]
    UndefinedAction { action: String },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
