//! Per-rule change monitoring
//!
//! One monitor owns one recursive change subscription under its rule's
//! source tree. Events feed a channel drained by a dedicated worker thread,
//! so rules are monitored independently and deliveries for one rule are
//! handled in turn, never overlapped.
//!
//! State machine per rule: `Idle -> Armed -> (qualifying change) ->
//! Triggering -> Armed`, with `Disabled` terminal via disposal. A Freeze
//! pass writes into the watched tree, so its monitor suspends delivery for
//! the span of the pass and discards whatever queued meanwhile; otherwise
//! the pass's own writes would re-trigger it without bound.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::thread::JoinHandle;

use notify::event::{EventKind, MetadataKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use mirrorwatch_core::WatchRule;

use crate::error::{Error, Result};
use crate::executor::Execute;

/// Where a monitor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    /// Constructed, subscription not yet live
    Idle,
    /// Subscription live, waiting for a qualifying change
    Armed,
    /// A triggered synchronization pass is in flight
    Triggering,
    /// Disposed; racing notifications are ignored
    Disabled,
}

const PHASE_IDLE: u8 = 0;
const PHASE_ARMED: u8 = 1;
const PHASE_TRIGGERING: u8 = 2;
const PHASE_DISABLED: u8 = 3;

/// Shared monitoring state for one rule.
///
/// `suspended` is raised only while a Freeze pass is in flight; it is the
/// observable face of the delivery-suspension window.
pub struct MonitorState {
    rule: WatchRule,
    phase: AtomicU8,
    suspended: AtomicBool,
}

impl MonitorState {
    pub(crate) fn new(rule: WatchRule) -> Self {
        Self {
            rule,
            phase: AtomicU8::new(PHASE_IDLE),
            suspended: AtomicBool::new(false),
        }
    }

    pub fn rule(&self) -> &WatchRule {
        &self.rule
    }

    pub fn phase(&self) -> MonitorPhase {
        match self.phase.load(Ordering::SeqCst) {
            PHASE_IDLE => MonitorPhase::Idle,
            PHASE_ARMED => MonitorPhase::Armed,
            PHASE_TRIGGERING => MonitorPhase::Triggering,
            _ => MonitorPhase::Disabled,
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }

    pub(crate) fn arm(&self) {
        self.phase.store(PHASE_ARMED, Ordering::SeqCst);
    }

    pub(crate) fn disable(&self) {
        self.phase.store(PHASE_DISABLED, Ordering::SeqCst);
    }

    /// Armed -> Triggering; Freeze rules also raise the suspension flag.
    fn begin_trigger(&self) {
        self.phase.store(PHASE_TRIGGERING, Ordering::SeqCst);
        if self.rule.mode.writes_into_source() {
            self.suspended.store(true, Ordering::SeqCst);
        }
    }

    /// Triggering -> Armed, unconditionally; the suspension flag always
    /// clears, whatever the pass reported.
    fn end_trigger(&self) {
        self.suspended.store(false, Ordering::SeqCst);
        if self.phase.load(Ordering::SeqCst) == PHASE_TRIGGERING {
            self.phase.store(PHASE_ARMED, Ordering::SeqCst);
        }
    }
}

/// Whether a native event should trigger a pass.
///
/// Data-affecting kinds qualify; access-time noise and catch-all "other"
/// events do not.
fn qualifies(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(MetadataKind::AccessTime)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Worker loop: drain the event channel for one rule, in turn.
///
/// Runs until the channel closes (the watcher was dropped by disposal).
/// After a Freeze pass, events that queued while the pass wrote into the
/// watched tree are discarded before delivery resumes.
pub(crate) fn drain_events(
    rx: Receiver<notify::Result<Event>>,
    state: Arc<MonitorState>,
    executor: Arc<dyn Execute>,
) {
    while let Ok(delivery) = rx.recv() {
        if state.phase() == MonitorPhase::Disabled {
            break;
        }

        let event = match delivery {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    source = %state.rule().source.display(),
                    error = %e,
                    "change notification error"
                );
                continue;
            }
        };

        if !qualifies(&event.kind) {
            continue;
        }

        debug!(
            source = %state.rule().source.display(),
            kind = ?event.kind,
            "change detected, triggering synchronization"
        );

        state.begin_trigger();
        let outcome = executor.execute(state.rule());
        if state.is_suspended() {
            // The pass wrote into the watched tree; drop its echo.
            while rx.try_recv().is_ok() {}
        }
        state.end_trigger();

        if outcome.exit_observed {
            debug!(
                source = %state.rule().source.display(),
                exit_code = ?outcome.exit_code,
                "synchronization pass finished"
            );
        }
    }
}

/// Live monitor for one rule: subscription, worker, and shared state.
pub struct ChangeMonitor {
    state: Arc<MonitorState>,
    watcher: Option<RecommendedWatcher>,
    worker: Option<JoinHandle<()>>,
}

impl ChangeMonitor {
    /// Subscribe under the rule's source and arm the monitor.
    ///
    /// Fails without arming when the source is missing at this instant or
    /// the native subscription cannot be created; callers treat that as a
    /// skipped rule.
    pub fn start(rule: WatchRule, executor: Arc<dyn Execute>) -> Result<Self> {
        if !rule.source.is_dir() {
            return Err(Error::SourceMissing {
                path: rule.source.clone(),
            });
        }

        let (tx, rx) = std::sync::mpsc::channel();
        let watcher = subscribe(&rule, tx)?;

        let state = Arc::new(MonitorState::new(rule));
        state.arm();

        let worker = {
            let state = Arc::clone(&state);
            std::thread::spawn(move || drain_events(rx, state, executor))
        };

        info!(
            mode = %state.rule().mode,
            source = %state.rule().source.display(),
            destination = %state.rule().destination.display(),
            "monitor armed"
        );

        Ok(Self {
            state,
            watcher: Some(watcher),
            worker: Some(worker),
        })
    }

    pub fn state(&self) -> &Arc<MonitorState> {
        &self.state
    }

    pub fn rule(&self) -> &WatchRule {
        self.state.rule()
    }

    /// Release the subscription and join the worker.
    ///
    /// Idempotent. An in-flight pass is not interrupted; the join waits for
    /// it to finish.
    pub fn dispose(&mut self) {
        self.state.disable();
        if let Some(watcher) = self.watcher.take() {
            drop(watcher);
            debug!(
                source = %self.state.rule().source.display(),
                "monitor disposed"
            );
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for ChangeMonitor {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn subscribe(rule: &WatchRule, tx: Sender<notify::Result<Event>>) -> Result<RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |delivery| {
        let _ = tx.send(delivery);
    })
    .map_err(|e| Error::Subscription {
        path: rule.source.clone(),
        source: e,
    })?;

    watcher
        .watch(&rule.source, RecursiveMode::Recursive)
        .map_err(|e| Error::Subscription {
            path: rule.source.clone(),
            source: e,
        })?;

    Ok(watcher)
}
