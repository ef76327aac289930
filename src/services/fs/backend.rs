use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};

/// Represents a file or directory entry
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    pub entry_type: FsEntryType,
}

impl FsEntry {
    pub fn new(path: PathBuf, name: String, entry_type: FsEntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == FsEntryType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == FsEntryType::File
    }
}

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsEntryType {
    File,
    Directory,
}

/// Async filesystem backend trait
///
/// Abstracts the handful of filesystem operations a scan needs so that
/// tests can substitute a scripted backend (see `FaultInjectingBackend`).
#[async_trait]
pub trait FsBackend: Send + Sync {
    /// Stat a single path and return its entry.
    ///
    /// Symlinks are resolved: a link counts as its target's kind, and a
    /// broken link is a stat failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be stat'ed (doesn't exist,
    /// permission denied, broken link, etc.)
    async fn get_entry(&self, path: &Path) -> io::Result<FsEntry>;

    /// List the basenames of a directory's entries (non-recursive).
    ///
    /// Order is whatever the OS yields; callers stat each name separately
    /// so one unreadable entry does not fail the listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Read a small text file (used for per-directory ignore files).
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_entry_creation() {
        let entry = FsEntry::new(
            PathBuf::from("/test/file.txt"),
            "file.txt".to_string(),
            FsEntryType::File,
        );

        assert_eq!(entry.name, "file.txt");
        assert!(entry.is_file());
        assert!(!entry.is_dir());
    }

    #[test]
    fn test_fs_entry_types() {
        let file = FsEntry::new(
            PathBuf::from("/file"),
            "file".to_string(),
            FsEntryType::File,
        );
        assert!(file.is_file());

        let dir = FsEntry::new(
            PathBuf::from("/dir"),
            "dir".to_string(),
            FsEntryType::Directory,
        );
        assert!(dir.is_dir());
    }
}
