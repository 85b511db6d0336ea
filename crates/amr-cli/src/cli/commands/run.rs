//! `amr` – scan the source tree, then mirror every discovered URL.

use anyhow::{Context, Result};
use amr_core::extract;
use amr_core::fetch::FetchPipeline;
use amr_core::queue::WorkQueue;
use amr_core::scheduler::{self, MirrorEvent};
use amr_core::settings::MirrorSettings;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::cli::Exit;

/// A progress line and the stream it belongs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventLine {
    Stdout(String),
    Stderr(String),
}

pub fn event_line(event: &MirrorEvent) -> EventLine {
    match event {
        MirrorEvent::Mirrored { url, .. } => EventLine::Stdout(format!("Mirrored URL: {}", url)),
        MirrorEvent::NotFound { url, .. } => EventLine::Stdout(format!("Skipped (404): {}", url)),
        MirrorEvent::Failed { url, cause, .. } => {
            EventLine::Stderr(format!("Error fetching URL: {}: {}", url, cause))
        }
        MirrorEvent::Fatal { url, cause } => {
            EventLine::Stderr(format!("Fatal error fetching URL: {}: {}", url, cause))
        }
    }
}

/// Waits for the progress printer; returns false (after logging) if it panicked.
pub async fn finish_printer(printer: JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "progress printer task failed");
            false
        }
    }
}

pub async fn run_mirror(settings: &MirrorSettings) -> Result<Exit> {
    println!("Scanning source folder tree...");
    let pattern = extract::url_pattern(&settings.types)?;
    let source = settings.source.clone();
    let urls = tokio::task::spawn_blocking(move || extract::scan_tree(&source, &pattern))
        .await
        .context("scan task join")??;

    let queue = Arc::new(WorkQueue::new(urls));
    println!("Fetching {} URLs...", queue.len());
    tracing::info!(
        output = %settings.output.display(),
        protected = ?settings.protected.patterns(),
        "starting mirror"
    );

    let fetcher = Arc::new(FetchPipeline::new(
        settings.output.clone(),
        settings.protected.clone(),
        settings.http.clone(),
    ));

    let (events_tx, mut events_rx) = tokio::sync::mpsc::channel::<MirrorEvent>(64);
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            match event_line(&event) {
                EventLine::Stdout(line) => println!("{}", line),
                EventLine::Stderr(line) => eprintln!("{}", line),
            }
        }
    });

    let report =
        scheduler::run_mirror(queue, fetcher, settings.concurrency, Some(events_tx)).await?;
    finish_printer(printer).await;

    println!("Done: {}; Errors: {}", report.stats.done, report.stats.errors);

    if report.is_aborted() {
        if let Some(fatal) = &report.fatal {
            tracing::error!(url = %fatal.url, cause = %fatal.cause, "run aborted");
        }
        return Ok(Exit::Aborted);
    }
    Ok(Exit::Done)
}
