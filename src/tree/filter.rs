//! Name-based exclusion for directory scans.
//!
//! Patterns are exact basenames only. A per-directory ignore file can
//! contribute additional names; its rules accumulate downward through the
//! scan, never upward or sideways.

use crate::services::fs::FsBackend;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

/// Per-directory ignore file consulted during scans
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Whether `name` is excluded by the active pattern set.
///
/// Pure membership test; patterns are literal names, not globs.
pub fn is_excluded(name: &str, active: &BTreeSet<String>) -> bool {
    active.contains(name)
}

/// Parse ignore-file contents into a pattern set.
///
/// Blank lines and `#` comments are skipped. A single leading `/` and a
/// single trailing `/` are stripped from each remaining line; whatever is
/// left is taken as a literal name (wildcards are not expanded).
pub fn parse_ignore_file(contents: &str) -> BTreeSet<String> {
    let mut patterns = BTreeSet::new();

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix('/').unwrap_or(line);
        let line = line.strip_suffix('/').unwrap_or(line);

        if !line.is_empty() {
            patterns.insert(line.to_string());
        }
    }

    patterns
}

/// Collect ignore-file patterns for a directory.
///
/// A missing ignore file is not an error; any other read failure is
/// logged and treated as if the file were empty.
pub async fn collect_ignore_patterns(backend: &dyn FsBackend, dir: &Path) -> BTreeSet<String> {
    let path = dir.join(IGNORE_FILE_NAME);

    match backend.read_to_string(&path).await {
        Ok(contents) => parse_ignore_file(&contents),
        Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeSet::new(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            BTreeSet::new()
        }
    }
}
