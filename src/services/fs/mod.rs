// Filesystem abstraction layer for async, pluggable file system access
//
// This module provides a small abstraction over the filesystem operations
// a directory scan needs, so that tests can substitute scripted backends.

pub mod backend;
pub mod fault;
pub mod local;

pub use backend::{FsBackend, FsEntry, FsEntryType};
pub use fault::FaultInjectingBackend;
pub use local::LocalFsBackend;
