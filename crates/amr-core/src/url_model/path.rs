//! Destination path and filename derivation from a URL path.

use crate::fetch::FetchError;
use std::path::{Component, Path, PathBuf};

/// Extracts the last path segment from a URL for use as a filename.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.last()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Local path a normalized URL is mirrored to:
/// `<output_root>/<host>/<url directories>/<filename>`.
///
/// The port is not part of the path. Percent escapes are kept as the URL
/// parser serializes them and dot segments are resolved by the parser. Every
/// pushed component must be a plain name (a host of `.` or `..` is rejected),
/// so the result always stays under `<output_root>/<host>`.
pub fn destination_path(output_root: &Path, url: &str) -> Result<PathBuf, FetchError> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let parsed = url::Url::parse(url).map_err(|e| invalid(&e.to_string()))?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| invalid("missing host"))?;
    let filename = filename_from_url_path(url).ok_or_else(|| invalid("missing filename"))?;

    let mut dest = output_root.to_path_buf();
    push_plain(&mut dest, host).ok_or_else(|| invalid("host is not a plain name"))?;
    let mut segments: Vec<&str> = parsed
        .path_segments()
        .ok_or_else(|| invalid("URL has no path"))?
        .collect();
    segments.pop();
    for dir in segments.into_iter().filter(|s| !s.is_empty()) {
        push_plain(&mut dest, dir).ok_or_else(|| invalid("path segment is not a plain name"))?;
    }
    push_plain(&mut dest, &filename).ok_or_else(|| invalid("filename is not a plain name"))?;
    Ok(dest)
}

/// Pushes `name` only if it is exactly one `Component::Normal`.
fn push_plain(dest: &mut PathBuf, name: &str) -> Option<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {
            dest.push(name);
            Some(())
        }
        _ => None,
    }
}
