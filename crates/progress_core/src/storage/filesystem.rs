//! File-system access used by board load/save.
//!
//! # Invariants
//! - `write` never replaces an existing file.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// File operations the storage layer needs.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn read(&self, path: &Path) -> io::Result<String>;
    /// Creates `path` with `contents`; fails with `AlreadyExists` if present.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::{FileSystem, LocalFileSystem};
    use std::io::ErrorKind;

    #[test]
    fn write_refuses_to_replace_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.xml");
        let fs = LocalFileSystem;

        assert!(!fs.exists(&path));
        fs.write(&path, "first").unwrap();
        assert!(fs.exists(&path));

        let err = fs.write(&path, "second").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(fs.read(&path).unwrap(), "first");
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFileSystem.read(&dir.path().join("missing.xml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
