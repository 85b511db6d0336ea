//! Run fetches concurrently from the work queue.
//!
//! Keeps up to `concurrency` fetches in flight; when one finishes, the next
//! URL is taken from the queue and started, until the queue is empty and the
//! last fetch has been joined. A fatal outcome returns at once without
//! starting anything else.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::fetch::{FetchOutcome, Fetcher};
use crate::queue::WorkQueue;
use crate::url_model::normalize_url;

use super::counters::RunCounters;
use super::progress::{FatalFailure, MirrorEvent, RunReport};

/// Lifecycle of a run. `Done` and `Aborted` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Starting fetches as slots free up.
    Running,
    /// Queue empty; waiting for in-flight fetches.
    Draining,
    /// Every URL was processed without a fatal outcome.
    Done,
    /// A protected host failed.
    Aborted,
}

fn transition(from: SchedulerState, to: SchedulerState, in_flight: usize) -> SchedulerState {
    tracing::debug!(?from, ?to, in_flight, "scheduler state change");
    to
}

/// Mirrors every URL in `queue` with at most `concurrency` fetches in flight.
///
/// Fetches run on tokio's blocking pool. Each outcome updates the counters and
/// is published on `events` (if given) in completion order. Returns a report
/// in state `Done`, or `Aborted` with the offending URL as soon as a fetch
/// returns `FatalError`; in-flight fetches are then left to the runtime.
pub async fn run_mirror<F: Fetcher>(
    queue: Arc<WorkQueue>,
    fetcher: Arc<F>,
    concurrency: usize,
    events: Option<mpsc::Sender<MirrorEvent>>,
) -> Result<RunReport> {
    let concurrency = concurrency.max(1);
    let counters = RunCounters::new();
    let mut state = SchedulerState::Running;
    let mut in_flight: JoinSet<(String, FetchOutcome)> = JoinSet::new();

    tracing::info!(urls = queue.len(), concurrency, "mirror run starting");

    loop {
        if state == SchedulerState::Running {
            while in_flight.len() < concurrency {
                let Some(raw_url) = queue.take_next() else {
                    state = transition(state, SchedulerState::Draining, in_flight.len());
                    break;
                };
                let fetcher = Arc::clone(&fetcher);
                in_flight.spawn_blocking(move || {
                    let outcome = fetcher.fetch(&raw_url);
                    (raw_url, outcome)
                });
            }
        }

        let Some(joined) = in_flight.join_next().await else {
            break;
        };
        let (raw_url, outcome) = joined.context("fetch task join")?;
        let url = normalize_url(&raw_url);

        let event = match outcome {
            FetchOutcome::Success { path, bytes } => {
                counters.record_done();
                tracing::info!(url = %url, path = %path.display(), bytes, "mirrored");
                MirrorEvent::Mirrored {
                    url,
                    path,
                    bytes,
                    stats: counters.snapshot(queue.len()),
                }
            }
            FetchOutcome::SkippedNotFound => {
                counters.record_error();
                tracing::info!(url = %url, "not found, skipped");
                MirrorEvent::NotFound {
                    url,
                    stats: counters.snapshot(queue.len()),
                }
            }
            FetchOutcome::RecoverableError(e) => {
                counters.record_error();
                tracing::warn!(url = %url, error = %e, "fetch failed");
                MirrorEvent::Failed {
                    url,
                    cause: e.to_string(),
                    stats: counters.snapshot(queue.len()),
                }
            }
            FetchOutcome::FatalError(e) => {
                state = transition(state, SchedulerState::Aborted, in_flight.len());
                tracing::error!(url = %url, error = %e, "fetch failed on protected host, aborting");
                let fatal = FatalFailure {
                    url,
                    cause: e.to_string(),
                };
                publish(
                    events.as_ref(),
                    MirrorEvent::Fatal {
                        url: fatal.url.clone(),
                        cause: fatal.cause.clone(),
                    },
                )
                .await;
                return Ok(RunReport {
                    state,
                    stats: counters.snapshot(queue.len()),
                    fatal: Some(fatal),
                });
            }
        };
        publish(events.as_ref(), event).await;
    }

    state = transition(state, SchedulerState::Done, 0);
    let stats = counters.snapshot(queue.len());
    tracing::info!(done = stats.done, errors = stats.errors, "mirror run complete");
    Ok(RunReport {
        state,
        stats,
        fatal: None,
    })
}

async fn publish(events: Option<&mpsc::Sender<MirrorEvent>>, event: MirrorEvent) {
    if let Some(tx) = events {
        // Receiver gone means nobody is reporting; the run itself continues.
        let _ = tx.send(event).await;
    }
}
