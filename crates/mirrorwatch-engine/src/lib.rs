//! Watch-and-synchronize engine for mirrorwatch
//!
//! Given the validated rule set from `mirrorwatch-core`, this crate keeps
//! each directory pair synchronized:
//!
//! - **Invocation**: builds the external-tool command for a rule as a plain
//!   value (robocopy or rsync argument conventions)
//! - **Executor**: runs one synchronization pass as a scoped child process,
//!   capturing both output streams
//! - **Monitor**: one recursive change subscription and worker per rule,
//!   with Freeze-mode suspension against self-triggered feedback loops
//! - **Orchestrator**: arms one monitor per runnable rule and owns the
//!   aggregate start/dispose lifecycle
//!
//! Failed passes are logged outcomes, never errors: a monitor stays armed
//! across failures, and nothing in this crate terminates the process.

pub mod error;
pub mod executor;
pub mod invocation;
pub mod monitor;
pub mod orchestrator;

pub use error::{Error, Result};
pub use executor::{Execute, SyncExecutor, SyncOutcome};
pub use invocation::{Invocation, ToolFlavor};
pub use monitor::{ChangeMonitor, MonitorPhase, MonitorState};
pub use orchestrator::{ExecutorSettings, Orchestrator};
