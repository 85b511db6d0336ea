//! URL discovery: build the match pattern from the configured extensions and
//! scan a source tree for unique URLs.

mod pattern;
mod scan;

pub use pattern::{parse_types, url_pattern};
pub use scan::{scan_file, scan_text, scan_tree};
