//! Retry policy forwarded to the external copy tool

use serde::{Deserialize, Serialize};

/// Retries the external tool performs per failed file operation when no
/// policy is configured.
pub const DEFAULT_RETRIES: u32 = 1_000_000;

/// Seconds the external tool waits between retries when no policy is
/// configured.
pub const DEFAULT_INTERVAL_SECS: u32 = 30;

/// Retry count and inter-retry wait forwarded to the external tool.
///
/// The engine never re-invokes the tool on failure; transient per-file
/// errors are handled by the tool's own retry mechanism, configured through
/// these two values. A policy counts as configured only when both fields are
/// positive; anything else falls back to the tool defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Number of retries per failed file operation
    #[serde(default = "default_retries")]
    pub retries: u32,
    /// Wait between retries, in seconds
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

fn default_interval_secs() -> u32 {
    DEFAULT_INTERVAL_SECS
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl RetryPolicy {
    /// Both fields positive.
    pub fn is_configured(&self) -> bool {
        self.retries > 0 && self.interval_secs > 0
    }

    /// Resolve an optional configured policy to the effective one.
    pub fn effective(policy: Option<RetryPolicy>) -> RetryPolicy {
        policy
            .filter(RetryPolicy::is_configured)
            .unwrap_or_default()
    }
}
