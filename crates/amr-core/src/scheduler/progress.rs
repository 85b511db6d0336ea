//! Progress reporting for a mirror run.
//!
//! The scheduler publishes one `MirrorEvent` per finished fetch; the CLI turns
//! them into progress lines. `RunReport` is the final result of a run.

use std::path::PathBuf;

use super::parallel::SchedulerState;

/// Snapshot of the run counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// URLs mirrored successfully.
    pub done: u64,
    /// URLs skipped (404) or failed.
    pub errors: u64,
    /// URLs not yet dispatched.
    pub remaining: usize,
}

impl RunStats {
    pub fn finished(&self) -> u64 {
        self.done + self.errors
    }
}

/// One finished fetch, in completion order. URLs are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    Mirrored {
        url: String,
        path: PathBuf,
        bytes: u64,
        stats: RunStats,
    },
    NotFound {
        url: String,
        stats: RunStats,
    },
    Failed {
        url: String,
        cause: String,
        stats: RunStats,
    },
    Fatal {
        url: String,
        cause: String,
    },
}

/// The failure that aborted a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalFailure {
    pub url: String,
    pub cause: String,
}

/// Final result of `run_mirror`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// `Done` or `Aborted`.
    pub state: SchedulerState,
    pub stats: RunStats,
    /// Set when `state` is `Aborted`.
    pub fatal: Option<FatalFailure>,
}

impl RunReport {
    pub fn is_aborted(&self) -> bool {
        self.state == SchedulerState::Aborted
    }
}
