use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use serde::Serialize;

/// Lifecycle of a `SchedulerRunner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerState {
    Idle,
    Building,
    Running,
    Stopping,
    Stopped,
}

impl RunnerState {
    pub fn accepts_jobs(&self) -> bool {
        matches!(self, RunnerState::Idle | RunnerState::Building | RunnerState::Running)
    }
}

impl fmt::Display for RunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunnerState::Idle => "idle",
            RunnerState::Building => "building",
            RunnerState::Running => "running",
            RunnerState::Stopping => "stopping",
            RunnerState::Stopped => "stopped",
        };
        f.write_str(label)
    }
}

/// What happened to a single firing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireDecision {
    /// Handed to its own execution context (possibly waiting in a queue).
    Dispatched,
    /// Dropped because the previous firing of the same domain is running.
    Skipped,
    /// Dropped because the runner is stopping.
    Stopped,
}

/// Snapshot of per-domain firing counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JobStats {
    pub fired: u64,
    pub succeeded: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// Result of a graceful stop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// True when every in-flight firing finished inside the bound.
    pub completed: bool,
    /// Domains still executing when the bound elapsed.
    pub abandoned: Vec<String>,
}

/// Per-domain state that survives job replacement, so overlap rules and
/// counters keep applying across re-registration.
#[derive(Default)]
pub(super) struct DomainSlot {
    pub running: AtomicBool,
    pub active: AtomicUsize,
    pub queue: tokio::sync::Mutex<()>,
    fired: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
    skipped: AtomicU64,
}

impl DomainSlot {
    pub fn record_fired(&self) {
        self.fired.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_finished(&self, success: bool) {
        let counter = if success { &self.succeeded } else { &self.failed };
        counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn stats(&self) -> JobStats {
        JobStats {
            fired: self.fired.load(Ordering::SeqCst),
            succeeded: self.succeeded.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            skipped: self.skipped.load(Ordering::SeqCst),
        }
    }
}
