//! Protected-host policy: hosts whose failures abort the whole run.
//!
//! Mirroring a protected host only partially is considered worse than not
//! mirroring at all, so any failure against one (other than a 404) escalates
//! from a counted error to a fatal one.

/// Set of host patterns. A host matches a pattern when it is equal to it or is
/// a subdomain of it (`a.example.com` matches `example.com`, `badexample.com`
/// does not). Comparison is ASCII case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedHosts {
    patterns: Vec<String>,
}

impl ProtectedHosts {
    /// Build from raw patterns; blanks are dropped and a leading `*.` or `.` is ignored.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for p in patterns {
            let p = p.as_ref().trim();
            let p = p.strip_prefix("*.").unwrap_or(p);
            let p = p.trim_start_matches('.').to_ascii_lowercase();
            if !p.is_empty() && !out.contains(&p) {
                out.push(p);
            }
        }
        Self { patterns: out }
    }

    /// Policy that never escalates.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if `host` is one of the patterns or a subdomain of one.
    pub fn is_protected(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.patterns.iter().any(|p| {
            host == *p
                || (host.len() > p.len()
                    && host.ends_with(p.as_str())
                    && host.as_bytes()[host.len() - p.len() - 1] == b'.')
        })
    }

    /// True if the URL parses and its host is protected. Unparseable URLs never are.
    pub fn is_protected_url(&self, url: &str) -> bool {
        url::Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(|h| self.is_protected(h)))
            .unwrap_or(false)
    }
}
