//! Aggregate lifecycle for all monitors
//!
//! The orchestrator reads the validated rule set once, arms one
//! executor-backed monitor per runnable rule, and owns the teardown of
//! everything it armed.

use std::sync::Arc;

use tracing::{info, warn};

use mirrorwatch_core::{RetryPolicy, WatchRule};

use crate::executor::SyncExecutor;
use crate::monitor::ChangeMonitor;

/// How the executors behind the monitors invoke the external tool.
#[derive(Debug, Clone, Default)]
pub struct ExecutorSettings {
    /// Retry policy forwarded to the tool; `None` means tool defaults
    pub retry: Option<RetryPolicy>,
    /// Program override replacing the platform default tool
    pub program: Option<String>,
}

/// Starts and disposes the full set of change monitors.
#[derive(Default)]
pub struct Orchestrator {
    monitors: Vec<ChangeMonitor>,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm one monitor per runnable rule.
    ///
    /// Source existence is re-checked here: validation and start are not
    /// atomic with the filesystem, and a rule whose source vanished in
    /// between is skipped, not fatal. The same goes for a rule whose native
    /// subscription cannot be created. An empty rule set is a logged no-op.
    pub fn start(&mut self, rules: Vec<WatchRule>, settings: &ExecutorSettings) {
        if rules.is_empty() {
            info!("no runnable watch rules, nothing to run");
            return;
        }

        for rule in rules {
            let mut executor = SyncExecutor::new(settings.retry);
            if let Some(program) = &settings.program {
                executor = executor.with_program(program.clone());
            }

            match ChangeMonitor::start(rule, Arc::new(executor)) {
                Ok(monitor) => self.monitors.push(monitor),
                Err(e) => {
                    warn!(error = %e, "skipping rule, monitor could not be armed");
                }
            }
        }

        info!(count = self.monitors.len(), "monitors armed");
    }

    /// Number of currently armed monitors.
    pub fn armed(&self) -> usize {
        self.monitors.len()
    }

    /// Tear down every armed monitor.
    ///
    /// Idempotent and safe to call when nothing was started. In-flight
    /// passes run to completion before their monitors are released.
    pub fn dispose(&mut self) {
        for mut monitor in self.monitors.drain(..) {
            monitor.dispose();
        }
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.dispose();
    }
}
