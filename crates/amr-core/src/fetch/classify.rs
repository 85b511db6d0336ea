//! Classify curl errors and HTTP statuses, and escalate failures on
//! protected hosts.

use super::error::{FetchError, TransportKind};
use super::FetchOutcome;
use crate::policy::ProtectedHosts;

/// What a final HTTP status means for the fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx: read the body and persist it.
    Success,
    /// 404: the asset was removed upstream; skip it.
    NotFound,
    /// Anything else: a failure worth surfacing.
    Failure,
}

/// Classify a final HTTP status code.
pub fn classify_http_status(code: u32) -> StatusClass {
    match code {
        200..=299 => StatusClass::Success,
        404 => StatusClass::NotFound,
        _ => StatusClass::Failure,
    }
}

/// Classify a curl error for logs.
pub fn classify_curl_error(e: &curl::Error) -> TransportKind {
    if e.is_operation_timedout() {
        return TransportKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return TransportKind::Connection;
    }
    TransportKind::Other
}

/// Wrap a curl error with its classification.
pub fn transport_error(source: curl::Error) -> FetchError {
    FetchError::Transport {
        kind: classify_curl_error(&source),
        source,
    }
}

/// Turn a failure on `url` into an outcome: fatal if the host is protected,
/// recoverable otherwise.
pub fn escalate(url: &str, error: FetchError, protected: &ProtectedHosts) -> FetchOutcome {
    if protected.is_protected_url(url) {
        FetchOutcome::FatalError(error)
    } else {
        FetchOutcome::RecoverableError(error)
    }
}
