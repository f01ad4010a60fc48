//! External-tool invocation building
//!
//! One synchronization pass is one child-process run of the platform's bulk
//! copy tool. The invocation is built as a plain value before anything is
//! spawned, so directionality, deletion semantics, and retry forwarding can
//! be checked without touching a process.

use std::path::Path;

use mirrorwatch_core::{RetryPolicy, SyncMode, WatchRule, tool_argument};

/// Which external tool's argument convention to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolFlavor {
    /// Windows robocopy: `src dst /E /S [/MIR] /NFL /NDL /NS /NC /B /R:n /W:s`
    Robocopy,
    /// rsync: `-a [--delete] src/ dst`
    Rsync,
}

impl ToolFlavor {
    /// The tool this platform ships with.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            ToolFlavor::Robocopy
        } else {
            ToolFlavor::Rsync
        }
    }

    /// Default program name for this flavor.
    pub fn program(&self) -> &'static str {
        match self {
            ToolFlavor::Robocopy => "robocopy",
            ToolFlavor::Rsync => "rsync",
        }
    }
}

/// One concrete external-tool command, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// The command as a single display string, for logging.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if arg.contains(' ') {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Build the invocation for one rule.
///
/// Freeze swaps the transfer direction: the reference copy in `destination`
/// is the reading side and the watched `source` is written. Copy drops the
/// delete-extraneous flag. Both paths go through [`tool_argument`], which
/// absolutizes and shortens a bare drive root to its two-character
/// designator.
///
/// `program_override` replaces the spawned program only; the argument list
/// still follows `flavor`.
pub fn build(
    rule: &WatchRule,
    policy: RetryPolicy,
    flavor: ToolFlavor,
    program_override: Option<&str>,
) -> Invocation {
    let (from, to) = transfer_direction(rule);
    let args = match flavor {
        ToolFlavor::Robocopy => robocopy_args(rule.mode, &from, &to, policy),
        ToolFlavor::Rsync => rsync_args(rule.mode, &from, &to),
    };

    Invocation {
        program: program_override.unwrap_or(flavor.program()).to_string(),
        args,
    }
}

/// Reading side and writing side of the transfer, as tool arguments.
fn transfer_direction(rule: &WatchRule) -> (String, String) {
    let source = tool_argument(&rule.source);
    let destination = tool_argument(&rule.destination);
    match rule.mode {
        SyncMode::Mirror | SyncMode::Copy => (source, destination),
        SyncMode::Freeze => (destination, source),
    }
}

fn robocopy_args(mode: SyncMode, from: &str, to: &str, policy: RetryPolicy) -> Vec<String> {
    let mut args = vec![from.to_string(), to.to_string()];
    args.push("/E".to_string());
    args.push("/S".to_string());
    if mode != SyncMode::Copy {
        args.push("/MIR".to_string());
    }
    for quiet in ["/NFL", "/NDL", "/NS", "/NC", "/B"] {
        args.push(quiet.to_string());
    }
    args.push(format!("/R:{}", policy.retries));
    args.push(format!("/W:{}", policy.interval_secs));
    args
}

fn rsync_args(mode: SyncMode, from: &str, to: &str) -> Vec<String> {
    let mut args = vec!["-a".to_string()];
    if mode != SyncMode::Copy {
        args.push("--delete".to_string());
    }
    // Trailing slash: transfer the contents of `from`, not the folder itself.
    let mut from = from.to_string();
    if !from.ends_with('/') {
        from.push('/');
    }
    args.push(from);
    args.push(to.to_string());
    args
}
