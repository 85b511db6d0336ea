//! Recursive source-tree scan for URLs.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;
use walkdir::WalkDir;

/// Adds every match of `pattern` in `text` to `out`, line by line.
pub fn scan_text(text: &str, pattern: &Regex, out: &mut BTreeSet<String>) {
    for line in text.lines().filter(|l| !l.is_empty()) {
        for m in pattern.find_iter(line) {
            out.insert(m.as_str().to_string());
        }
    }
}

/// Scans one file. Non-UTF-8 bytes are replaced, so binary files are harmless.
pub fn scan_file(path: &Path, pattern: &Regex, out: &mut BTreeSet<String>) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    scan_text(&String::from_utf8_lossy(&bytes), pattern, out);
    Ok(())
}

/// Walks `root` recursively (symlinks not followed) and returns the unique
/// URLs found in all regular files.
pub fn scan_tree(root: &Path, pattern: &Regex) -> Result<BTreeSet<String>> {
    let mut urls = BTreeSet::new();
    let mut files = 0usize;
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("scanning {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        scan_file(entry.path(), pattern, &mut urls)?;
        files += 1;
    }
    tracing::info!(
        root = %root.display(),
        files,
        urls = urls.len(),
        "source scan complete"
    );
    Ok(urls)
}
