use super::backend::{FsBackend, FsEntry, FsEntryType};
use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Filesystem backend using the local filesystem via tokio
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFsBackend;

impl LocalFsBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Display name for a path: its basename, or the path itself when it has
/// none (e.g. `/`).
fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[async_trait]
impl FsBackend for LocalFsBackend {
    async fn get_entry(&self, path: &Path) -> io::Result<FsEntry> {
        let metadata = tokio::fs::metadata(path).await?;

        let entry_type = if metadata.is_dir() {
            FsEntryType::Directory
        } else {
            FsEntryType::File
        };

        Ok(FsEntry::new(path.to_path_buf(), entry_name(path), entry_type))
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().to_string());
        }

        Ok(names)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}
