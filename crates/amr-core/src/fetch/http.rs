//! Single-stream HTTP GET into memory.
//!
//! Uses the curl crate (libcurl). Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

use super::classify::transport_error;
use super::error::FetchError;
use crate::config::HttpConfig;
use std::str;
use std::time::Duration;

/// Options applied to every GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub max_redirects: u32,
    pub user_agent: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            max_redirects: cfg.max_redirects,
            user_agent: cfg
                .user_agent
                .clone()
                .unwrap_or_else(|| format!("amr/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

/// Final response of a GET after redirects.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    /// Reason phrase from the final status line (empty for HTTP/2).
    pub reason: String,
    pub body: Vec<u8>,
}

/// Performs a GET and buffers the whole body.
///
/// Any non-2xx status is returned as a response, not an error; only transport
/// failures (DNS, connect, timeout, truncated body) are errors.
pub fn http_get(url: &str, opts: &HttpOptions) -> Result<HttpResponse, FetchError> {
    let mut body: Vec<u8> = Vec::new();
    let mut status_line: Option<String> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(transport_error)?;
    easy.follow_location(true).map_err(transport_error)?;
    easy.max_redirections(opts.max_redirects)
        .map_err(transport_error)?;
    easy.useragent(&opts.user_agent).map_err(transport_error)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t).map_err(transport_error)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t).map_err(transport_error)?;
    }

    {
        let mut transfer = easy.transfer();
        // Each redirect hop starts a new header block; keep the last status line.
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    let line = s.trim_end();
                    if line.starts_with("HTTP/") {
                        status_line = Some(line.to_string());
                    }
                }
                true
            })
            .map_err(transport_error)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(transport_error)?;
        transfer.perform().map_err(transport_error)?;
    }

    let status = easy.response_code().map_err(transport_error)?;
    let reason = status_line
        .as_deref()
        .and_then(parse_status_line)
        .filter(|(code, _)| *code == status)
        .map(|(_, reason)| reason)
        .unwrap_or_default();

    Ok(HttpResponse {
        status,
        reason,
        body,
    })
}

/// Parse `HTTP/1.1 404 Not Found` into `(404, "Not Found")`.
fn parse_status_line(line: &str) -> Option<(u32, String)> {
    let mut parts = line.trim().splitn(3, ' ');
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    let code = parts.next()?.trim().parse::<u32>().ok()?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Some((code, reason))
}
