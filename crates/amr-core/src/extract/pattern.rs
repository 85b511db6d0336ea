//! Extension list parsing and URL regex construction.

use anyhow::{ensure, Context, Result};
use regex::{Regex, RegexBuilder};

// Host: no `/ ? # ' " : < > ( )` or whitespace. Path: same minus `/` and `:`.
const HOST_CLASS: &str = r#"[^/?#'":<>()\s]+"#;
const PATH_CLASS: &str = r#"[^?#'"<>()\s]+"#;

/// Splits a comma-separated extension list, trimming whitespace and dropping
/// empty entries. A leading `.` on an entry is ignored.
pub fn parse_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .map(|t| t.strip_prefix('.').unwrap_or(t))
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Case-insensitive pattern for `//<host>/<path>.<ext>` with `<ext>` one of `types`.
pub fn url_pattern(types: &[String]) -> Result<Regex> {
    ensure!(!types.is_empty(), "no file types to match");
    let alternatives = types
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"//{}/{}\.(?:{})", HOST_CLASS, PATH_CLASS, alternatives);
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .size_limit(1024 * 1024)
        .build()
        .with_context(|| format!("building URL pattern from types {:?}", types))
}
