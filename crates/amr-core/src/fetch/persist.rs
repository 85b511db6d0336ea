//! Persist a fetched body at its destination path.

use super::error::FetchError;
use std::fs;
use std::path::Path;

/// Creates the parent directories of `dest` and writes `body`, replacing any
/// existing file. Not atomic: a crash mid-write leaves a truncated file.
pub fn write_body(dest: &Path, body: &[u8]) -> Result<(), FetchError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|source| FetchError::Storage {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(dest, body).map_err(|source| FetchError::Storage {
        path: dest.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_directories_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("cdn.example.com/a/b/c.png");
        write_body(&dest, b"\x89PNG").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"\x89PNG");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("h/x.jpg");
        write_body(&dest, b"first version, longer").unwrap();
        write_body(&dest, b"second").unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"second");
    }

    #[test]
    fn directory_blocked_by_file_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("h"), b"not a dir").unwrap();
        let err = write_body(&dir.path().join("h/x.jpg"), b"data").unwrap_err();
        assert!(matches!(err, FetchError::Storage { .. }));
    }
}
