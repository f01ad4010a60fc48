//! Error types for mirrorwatch-engine

use std::path::PathBuf;

/// Result type for mirrorwatch-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while arming a monitor.
///
/// Execution failures are not represented here: a failed synchronization
/// pass is a logged [`SyncOutcome`](crate::SyncOutcome), never an `Err`,
/// so the monitor stays armed for the next change.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Source folder does not exist: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to subscribe to changes under {path}: {source}")]
    Subscription {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}
