//! Recursive directory-to-tree conversion.
//!
//! A scan walks the filesystem through an `FsBackend`, consulting the
//! name filter at every level. Only total inaccessibility of the chosen
//! root is fatal; anything below it degrades to an error placeholder or
//! an omission, so one unreadable subdirectory never aborts the scan of
//! its siblings.

use super::filter::{collect_ignore_patterns, is_excluded};
use super::node::{NodeId, NodeKind};
use super::store::TreeStore;
use crate::services::fs::FsBackend;
use std::collections::BTreeSet;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use thiserror::Error;

/// Options controlling a scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Names excluded everywhere, regardless of ignore-file content
    pub ignore_names: BTreeSet<String>,
    /// Whether per-directory ignore files contribute patterns
    pub use_ignore_file: bool,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self {
            ignore_names: BTreeSet::new(),
            use_ignore_file: true,
        }
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Fatal scan failures. Everything else degrades into the tree itself.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot access {}: {source}", .path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not a directory", .path.display())]
    RootNotADirectory { path: PathBuf },
}

/// Scan a directory into a fresh tree store.
///
/// The root's own name is never tested against the filter: a root the
/// user chose is always included, even when its basename matches an
/// ignore pattern. The returned store always contains the root node, so
/// callers can tell "scanned and empty" from "could not scan".
///
/// # Errors
///
/// Fails only when the root path cannot be stat'ed or is not a
/// directory.
pub async fn build(
    backend: &dyn FsBackend,
    root_path: &Path,
    options: &ScanOptions,
) -> Result<TreeStore, ScanError> {
    let root_entry =
        backend
            .get_entry(root_path)
            .await
            .map_err(|source| ScanError::RootInaccessible {
                path: root_path.to_path_buf(),
                source,
            })?;

    if !root_entry.is_dir() {
        return Err(ScanError::RootNotADirectory {
            path: root_path.to_path_buf(),
        });
    }

    let mut store = TreeStore::new(root_entry.name);
    scan_dir(
        backend,
        &mut store,
        NodeId::ROOT,
        root_path,
        options.ignore_names.clone(),
        options,
    )
    .await;

    Ok(store)
}

/// Recurse into one directory, attaching its children to `dir_id`.
///
/// `inherited` is the pattern set accumulated from the explicit list and
/// all ancestor ignore files; this directory's own ignore file is added
/// before any child is tested.
fn scan_dir<'a>(
    backend: &'a dyn FsBackend,
    store: &'a mut TreeStore,
    dir_id: NodeId,
    dir_path: &'a Path,
    inherited: BTreeSet<String>,
    options: &'a ScanOptions,
) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
    Box::pin(async move {
        let mut active = inherited;
        if options.use_ignore_file {
            active.extend(collect_ignore_patterns(backend, dir_path).await);
        }

        let mut names = match backend.read_dir(dir_path).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Cannot list {}: {}", dir_path.display(), e);
                // The root stays a folder (scanned, empty); anything
                // deeper becomes an error placeholder.
                if dir_id != NodeId::ROOT {
                    store.demote_to_error(dir_id);
                }
                return;
            }
        };
        // OS listing order varies; fix it so arena insertion is stable.
        names.sort();

        for name in names {
            if is_excluded(&name, &active) {
                continue;
            }

            let child_path = dir_path.join(&name);
            match backend.get_entry(&child_path).await {
                Err(e) => {
                    tracing::debug!("Cannot stat {}: {}", child_path.display(), e);
                    store.attach_child(dir_id, name, NodeKind::Error);
                }
                Ok(entry) if entry.is_dir() => {
                    let child_id = store.attach_child(dir_id, name, NodeKind::Folder);
                    scan_dir(backend, store, child_id, &child_path, active.clone(), options).await;
                }
                Ok(_) => {
                    store.attach_child(dir_id, name, NodeKind::File);
                }
            }
        }
    })
}
