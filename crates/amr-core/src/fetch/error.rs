//! Per-URL fetch error type, carried by the error outcomes.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a transport (curl) failure, for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection refused/reset, DNS, short read).
    Connection,
    /// Anything else curl reported.
    Other,
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportKind::Timeout => write!(f, "timeout"),
            TransportKind::Connection => write!(f, "connection"),
            TransportKind::Other => write!(f, "transport"),
        }
    }
}

/// Why a single fetch failed. Never retried; the scheduler only counts it
/// or, for protected hosts, aborts the run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The normalized URL cannot be mapped to a destination path.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Curl reported an error before the body was fully received.
    #[error("{kind} error: {source}")]
    Transport {
        kind: TransportKind,
        #[source]
        source: curl::Error,
    },

    /// Final response had a non-2xx status other than 404.
    #[error("{}", http_message(.status, .reason))]
    Http { status: u32, reason: String },

    /// Creating the destination directory or writing the file failed.
    #[error("storage: {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn http_message(status: &u32, reason: &str) -> String {
    if reason.is_empty() {
        format!("HTTP {}", status)
    } else {
        format!("HTTP {} {}", status, reason)
    }
}
