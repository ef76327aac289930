//! Fault-injecting backend wrapper for exercising degraded scan paths.
//!
//! Wraps another backend and fails stat or listing for configured paths,
//! so tests can produce unreadable entries without fiddling with real
//! filesystem permissions.

use super::backend::{FsBackend, FsEntry};
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Backend wrapper that injects failures for configured paths
pub struct FaultInjectingBackend<B> {
    inner: B,
    stat_failures: HashSet<PathBuf>,
    list_failures: HashSet<PathBuf>,
}

impl<B: FsBackend> FaultInjectingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            stat_failures: HashSet::new(),
            list_failures: HashSet::new(),
        }
    }

    /// Fail `get_entry` for this path with `PermissionDenied`.
    pub fn fail_stat(mut self, path: impl Into<PathBuf>) -> Self {
        self.stat_failures.insert(path.into());
        self
    }

    /// Fail `read_dir` for this path with `PermissionDenied`.
    pub fn fail_list(mut self, path: impl Into<PathBuf>) -> Self {
        self.list_failures.insert(path.into());
        self
    }

    fn denied(path: &Path) -> io::Error {
        io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("injected failure for {}", path.display()),
        )
    }
}

#[async_trait]
impl<B: FsBackend> FsBackend for FaultInjectingBackend<B> {
    async fn get_entry(&self, path: &Path) -> io::Result<FsEntry> {
        if self.stat_failures.contains(path) {
            return Err(Self::denied(path));
        }
        self.inner.get_entry(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        if self.list_failures.contains(path) {
            return Err(Self::denied(path));
        }
        self.inner.read_dir(path).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.inner.read_to_string(path).await
    }
}
