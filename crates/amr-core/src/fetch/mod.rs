//! Fetch pipeline: GET one URL, classify the response, persist the body.
//!
//! normalize → GET → status class → destination path → mkdir -p → write.
//! Every failure except a 404 is escalated through the protected-host policy.

mod classify;
mod error;
mod http;
mod persist;

pub use classify::{classify_curl_error, classify_http_status, escalate, StatusClass};
pub use error::{FetchError, TransportKind};
pub use http::{http_get, HttpOptions, HttpResponse};
pub use persist::write_body;

use crate::policy::ProtectedHosts;
use crate::url_model;
use std::path::PathBuf;

/// Result of fetching one URL.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Body written to `path`.
    Success { path: PathBuf, bytes: u64 },
    /// Upstream answered 404; nothing written.
    SkippedNotFound,
    /// Failure on an unprotected host; counted, run continues.
    RecoverableError(FetchError),
    /// Failure on a protected host; the run must abort.
    FatalError(FetchError),
}

impl FetchOutcome {
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchOutcome::FatalError(_))
    }
}

/// Something that can mirror one URL. Called on the blocking pool, so
/// implementations may block.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, raw_url: &str) -> FetchOutcome;
}

/// The real pipeline: libcurl GET, then write under `output_root`.
#[derive(Debug, Clone)]
pub struct FetchPipeline {
    output_root: PathBuf,
    protected: ProtectedHosts,
    http: HttpOptions,
}

impl FetchPipeline {
    pub fn new(output_root: impl Into<PathBuf>, protected: ProtectedHosts, http: HttpOptions) -> Self {
        Self {
            output_root: output_root.into(),
            protected,
            http,
        }
    }

    /// `Ok(None)` means 404.
    fn try_fetch(&self, url: &str) -> Result<Option<(PathBuf, u64)>, FetchError> {
        let resp = http_get(url, &self.http)?;
        match classify_http_status(resp.status) {
            StatusClass::NotFound => return Ok(None),
            StatusClass::Failure => {
                return Err(FetchError::Http {
                    status: resp.status,
                    reason: resp.reason,
                })
            }
            StatusClass::Success => {}
        }

        let dest = url_model::destination_path(&self.output_root, url)?;
        write_body(&dest, &resp.body)?;
        Ok(Some((dest, resp.body.len() as u64)))
    }
}

impl Fetcher for FetchPipeline {
    fn fetch(&self, raw_url: &str) -> FetchOutcome {
        let url = url_model::normalize_url(raw_url);
        tracing::debug!(url = %url, "fetching");
        match self.try_fetch(&url) {
            Ok(Some((path, bytes))) => FetchOutcome::Success { path, bytes },
            Ok(None) => FetchOutcome::SkippedNotFound,
            Err(e) => escalate(&url, e, &self.protected),
        }
    }
}
