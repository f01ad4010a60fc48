//! Rule validation
//!
//! Turns raw configuration candidates into the authoritative runnable rule
//! set. Checks run in a fixed order per candidate because step 3 has a side
//! effect (creating the destination directory): action name, source exists,
//! destination creatable, root-folder guard.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::mode::SyncMode;
use crate::path;
use crate::rule::{RawRule, WatchRule};

/// Why one candidate was excluded from the runnable set.
#[derive(Debug)]
pub enum RejectReason {
    /// `action` does not name a defined synchronization mode
    UndefinedAction,
    /// `source` does not exist as a directory
    SourceMissing,
    /// `destination` was absent and could not be created
    DestinationNotCreatable(std::io::Error),
    /// The root-guarded side of the pair is a filesystem root
    RootFolder { checked: PathBuf },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::UndefinedAction => write!(f, "undefined action"),
            RejectReason::SourceMissing => write!(f, "source folder does not exist"),
            RejectReason::DestinationNotCreatable(source) => {
                write!(f, "destination folder cannot be created: {source}")
            }
            RejectReason::RootFolder { checked } => {
                write!(f, "{} is a filesystem root", checked.display())
            }
        }
    }
}

/// One excluded candidate with its cause.
#[derive(Debug)]
pub struct RejectedRule {
    pub rule: RawRule,
    pub reason: RejectReason,
}

/// Everything validation decided, in candidate order.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub accepted: Vec<WatchRule>,
    pub rejected: Vec<RejectedRule>,
}

/// Validate candidates in order, reporting acceptances and rejections.
///
/// Rejections are not errors: each is logged with its cause and omitted from
/// the accepted set. Acceptance has one side effect, creating a missing
/// destination directory with its parents. An empty accepted set is valid
/// and means there is nothing to run.
pub fn validate_report(candidates: &[RawRule]) -> ValidationReport {
    let mut report = ValidationReport::default();

    for candidate in candidates {
        match check_candidate(candidate) {
            Ok(rule) => {
                info!(
                    action = %rule.mode,
                    source = %rule.source.display(),
                    destination = %rule.destination.display(),
                    "accepted watch rule"
                );
                report.accepted.push(rule);
            }
            Err(reason) => {
                warn!(
                    action = %candidate.action,
                    source = %candidate.source,
                    destination = %candidate.destination,
                    cause = %reason,
                    "skipping invalid watch rule"
                );
                report.rejected.push(RejectedRule {
                    rule: candidate.clone(),
                    reason,
                });
            }
        }
    }

    report
}

/// Validate candidates, keeping only runnable rules.
///
/// See [`validate_report`] for the full report including rejection causes.
pub fn validate(candidates: &[RawRule]) -> Vec<WatchRule> {
    validate_report(candidates).accepted
}

fn check_candidate(candidate: &RawRule) -> std::result::Result<WatchRule, RejectReason> {
    let mode: SyncMode = candidate
        .action
        .parse()
        .map_err(|_| RejectReason::UndefinedAction)?;

    let source = PathBuf::from(&candidate.source);
    let destination = PathBuf::from(&candidate.destination);

    if !source.is_dir() {
        return Err(RejectReason::SourceMissing);
    }

    if !destination.is_dir() {
        fs::create_dir_all(&destination).map_err(RejectReason::DestinationNotCreatable)?;
    }

    // Mirroring at a filesystem root is unsafe for the external tool, so the
    // side the transfer reads the authoritative tree from is guarded.
    let checked = match mode {
        SyncMode::Freeze => &destination,
        SyncMode::Mirror | SyncMode::Copy => &source,
    };
    if path::is_filesystem_root(checked) {
        return Err(RejectReason::RootFolder {
            checked: path::absolutize(checked),
        });
    }

    Ok(WatchRule {
        mode,
        source,
        destination,
    })
}
