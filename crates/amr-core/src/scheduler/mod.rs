//! Mirror scheduler.
//!
//! Drains the work queue through a fixed-size pool of fetches:
//! queue → `Fetcher` (blocking pool) → outcome → counters/events.
//! A fatal outcome stops scheduling immediately.

mod counters;
mod parallel;
mod progress;

pub use counters::RunCounters;
pub use parallel::{run_mirror, SchedulerState};
pub use progress::{FatalFailure, MirrorEvent, RunReport, RunStats};
