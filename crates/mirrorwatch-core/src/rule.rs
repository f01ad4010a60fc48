//! Watch-rule types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::mode::SyncMode;

/// One rule candidate as it appears in configuration, before validation.
///
/// `action` is a free string at this stage. It is parsed into a
/// [`SyncMode`] by validation and never travels further unparsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRule {
    /// Requested synchronization action by name
    pub action: String,
    /// Directory to watch and synchronize from
    pub source: String,
    /// Directory to synchronize into
    pub destination: String,
}

impl RawRule {
    pub fn new(
        action: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// One validated rule governing a monitored directory pair.
///
/// Invariants hold from validation onward: `source` exists as a directory,
/// `destination` exists, and the root-guarded side of the pair is not a
/// filesystem root. Immutable; owned by the monitor bound to it for the
/// process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRule {
    pub mode: SyncMode,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl From<&WatchRule> for RawRule {
    fn from(rule: &WatchRule) -> Self {
        RawRule {
            action: rule.mode.to_string(),
            source: rule.source.to_string_lossy().into_owned(),
            destination: rule.destination.to_string_lossy().into_owned(),
        }
    }
}
