//! Synchronization modes for watch rules

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Direction and deletion semantics of one synchronization pass.
///
/// Parsed from the free-form `action` string in configuration. Matching is
/// case-sensitive: `"mirror"` is not a defined action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncMode {
    /// One-way mirror from source to destination.
    ///
    /// The destination becomes an exact copy; files absent from the source
    /// are deleted from the destination.
    Mirror,

    /// One-way mirror from destination back to source, the inverse of
    /// [`SyncMode::Mirror`].
    ///
    /// Restores the watched tree from a frozen reference copy whenever the
    /// tree changes.
    Freeze,

    /// One-way recursive copy from source to destination without deleting
    /// extraneous destination files.
    Copy,
}

impl SyncMode {
    /// All defined action names, in declaration order.
    pub fn all_names() -> &'static [&'static str] {
        &["Mirror", "Freeze", "Copy"]
    }

    /// Whether a pass in this mode writes into the watched source tree.
    ///
    /// Freeze passes do, which is why their monitors suspend notifications
    /// for the span of a pass.
    pub fn writes_into_source(&self) -> bool {
        matches!(self, SyncMode::Freeze)
    }
}

impl FromStr for SyncMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Mirror" => Ok(SyncMode::Mirror),
            "Freeze" => Ok(SyncMode::Freeze),
            "Copy" => Ok(SyncMode::Copy),
            _ => Err(Error::UndefinedAction {
                action: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncMode::Mirror => write!(f, "Mirror"),
            SyncMode::Freeze => write!(f, "Freeze"),
            SyncMode::Copy => write!(f, "Copy"),
        }
    }
}
