//! Synchronization execution
//!
//! One execution is one scoped child-process run: spawn hidden, redirect
//! both streams, read line-by-line, wait for exit, release. Nothing in here
//! returns an error to the caller; a pass that cannot run is a logged
//! [`SyncOutcome`] and the monitor that triggered it stays armed.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, Stdio};

use tracing::{error, info, warn};

use mirrorwatch_core::{RetryPolicy, SyncMode, WatchRule};

use crate::invocation::{self, Invocation, ToolFlavor};

/// What one synchronization pass produced.
///
/// Transient: built fresh per invocation, consumed by logging, never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Captured standard output, in arrival order
    pub stdout_lines: Vec<String>,
    /// Captured standard error, in arrival order
    pub stderr_lines: Vec<String>,
    /// Whether the external process was observed to exit
    pub exit_observed: bool,
    /// Exit code when the process ran and reported one
    pub exit_code: Option<i32>,
}

impl SyncOutcome {
    /// Outcome of a pass that never spawned the tool.
    pub fn skipped() -> Self {
        Self::default()
    }

    /// The process exited without producing a single line on either stream.
    ///
    /// Distinct from an empty skipped outcome: a silent run usually means
    /// the tool was pointed at a path where it had nothing to do.
    pub fn ran_with_no_output(&self) -> bool {
        self.exit_observed && self.stdout_lines.is_empty() && self.stderr_lines.is_empty()
    }
}

/// Executes one synchronization pass for a rule.
///
/// Monitors call through this trait so tests can substitute a recording
/// double for the real process spawn.
pub trait Execute: Send + Sync {
    fn execute(&self, rule: &WatchRule) -> SyncOutcome;
}

/// The real executor: builds the tool invocation and runs it.
pub struct SyncExecutor {
    policy: RetryPolicy,
    flavor: ToolFlavor,
    program_override: Option<String>,
}

impl SyncExecutor {
    /// Build an executor for the platform tool.
    ///
    /// An absent or not-fully-positive policy falls back to the tool
    /// defaults (1,000,000 retries, 30s interval).
    pub fn new(policy: Option<RetryPolicy>) -> Self {
        Self {
            policy: RetryPolicy::effective(policy),
            flavor: ToolFlavor::platform_default(),
            program_override: None,
        }
    }

    /// Replace the spawned program while keeping the flavor's arguments.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program_override = Some(program.into());
        self
    }

    /// Force an argument convention instead of the platform default.
    pub fn with_flavor(mut self, flavor: ToolFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// The invocation this executor would spawn for `rule`.
    pub fn invocation_for(&self, rule: &WatchRule) -> Invocation {
        invocation::build(rule, self.policy, self.flavor, self.program_override.as_deref())
    }

    /// Both sides a pass in this mode needs to exist up front.
    ///
    /// A Freeze pass reads the destination, so a missing destination is as
    /// fatal to the pass as a missing source.
    fn precheck(rule: &WatchRule) -> bool {
        if !rule.source.is_dir() {
            warn!(
                source = %rule.source.display(),
                "source folder does not exist, skipping synchronization"
            );
            return false;
        }
        if rule.mode == SyncMode::Freeze && !rule.destination.is_dir() {
            warn!(
                destination = %rule.destination.display(),
                "destination folder does not exist, skipping Freeze synchronization"
            );
            return false;
        }
        true
    }

    fn run(&self, invocation: &Invocation) -> SyncOutcome {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_window(&mut command);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!(
                    command = %invocation.command_line(),
                    error = %e,
                    "failed to start external copy tool"
                );
                return SyncOutcome::skipped();
            }
        };

        let outcome = wait_and_capture(child);

        if outcome.ran_with_no_output() {
            info!(
                command = %invocation.command_line(),
                "external copy tool ran with no output"
            );
        }
        if !outcome.exit_observed && !outcome.stderr_lines.is_empty() {
            for (n, line) in outcome.stderr_lines.iter().enumerate() {
                error!("[{}]: {}", n + 1, line);
            }
        }

        outcome
    }
}

impl Execute for SyncExecutor {
    fn execute(&self, rule: &WatchRule) -> SyncOutcome {
        if !Self::precheck(rule) {
            return SyncOutcome::skipped();
        }

        let invocation = self.invocation_for(rule);
        info!(
            mode = %rule.mode,
            command = %invocation.command_line(),
            "running synchronization pass"
        );
        self.run(&invocation)
    }
}

/// Drain both streams and wait for exit, releasing the child on every path.
///
/// Stderr is drained on its own thread so a tool that fills the stderr pipe
/// first cannot deadlock against our stdout read.
fn wait_and_capture(mut child: Child) -> SyncOutcome {
    let stderr_reader = child.stderr.take().map(|stderr| {
        std::thread::spawn(move || capture_lines(stderr, "stderr"))
    });

    let stdout_lines = match child.stdout.take() {
        Some(stdout) => capture_lines(stdout, "stdout"),
        None => Vec::new(),
    };

    let stderr_lines = stderr_reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();

    match child.wait() {
        Ok(status) => SyncOutcome {
            stdout_lines,
            stderr_lines,
            exit_observed: true,
            exit_code: status.code(),
        },
        Err(e) => {
            error!(error = %e, "failed to wait for external copy tool");
            SyncOutcome {
                stdout_lines,
                stderr_lines,
                exit_observed: false,
                exit_code: None,
            }
        }
    }
}

/// Read a stream to completion, logging each line with its 1-based number.
fn capture_lines(stream: impl Read, stream_name: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for line in BufReader::new(stream).lines().map_while(|l| l.ok()) {
        if line.is_empty() {
            continue;
        }
        info!(stream = stream_name, "[{}]: {}", lines.len() + 1, line);
        lines.push(line);
    }
    lines
}

#[cfg(windows)]
fn hide_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    command.creation_flags(CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_window(_command: &mut Command) {}
