//! Rule model, validation, and configuration for mirrorwatch
//!
//! This crate holds everything the engine needs before a watch is armed:
//!
//! - **SyncMode**: the closed set of synchronization actions (Mirror, Freeze, Copy)
//! - **Rules**: raw configuration candidates and validated watch rules
//! - **Validation**: filters candidates into the authoritative runnable set
//! - **Config**: the TOML document with retry policy, tool override, and rules
//! - **Path handling**: normalization for external-tool arguments
//!
//! # Architecture
//!
//! `mirrorwatch-core` sits below the engine and the CLI:
//!
//! ```text
//!       mirrorwatch-cli
//!             |
//!      mirrorwatch-engine
//!             |
//!       mirrorwatch-core
//! ```
//!
//! Raw `action` strings from configuration are parsed into [`SyncMode`] at
//! the validation boundary and never travel further as strings.

pub mod config;
pub mod error;
pub mod mode;
pub mod path;
pub mod policy;
pub mod rule;
pub mod validate;

pub use config::{Config, ToolSection};
pub use error::{Error, Result};
pub use mode::SyncMode;
pub use path::{absolutize, is_filesystem_root, tool_argument};
pub use policy::{DEFAULT_INTERVAL_SECS, DEFAULT_RETRIES, RetryPolicy};
pub use rule::{RawRule, WatchRule};
pub use validate::{RejectReason, RejectedRule, ValidationReport, validate, validate_report};
