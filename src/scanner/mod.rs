//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Depth-first directory walking using walkdir
//! - Streaming SHA-256 content digests
//! - Absolute paths and Unicode-aware path comparison
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: SHA-256 file hashing (streaming)
//! - [`path_utils`]: Lexical absolutization and NFC comparison keys
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::scan;
//! use std::path::Path;
//!
//! for record in scan(Path::new(".")).unwrap() {
//!     println!("{}: {} bytes", record.path.display(), record.size);
//! }
//! ```

pub mod hasher;
pub mod path_utils;
pub mod walker;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// Re-export main types
pub use hasher::{ContentDigest, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::{scan, Walker};

/// A regular file discovered during a scan.
///
/// Identifies a file by location and byte length at scan time. Records are
/// transient: they are never persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileRecord {
    /// Create a new FileRecord.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// What to do when a single entry cannot be read during a pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Abort the whole operation on the first failure.
    #[default]
    Abort,
    /// Leave the offending entry out and report it alongside the results.
    Skip,
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// How to treat entries that cannot be read.
    pub error_policy: ErrorPolicy,
}

impl WalkerConfig {
    /// Create a new configuration with the given error policy.
    #[must_use]
    pub fn new(error_policy: ErrorPolicy) -> Self {
        Self { error_policy }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The scan root is missing or is not a directory.
    #[error("Invalid root {path}: {reason}")]
    InvalidRoot {
        /// Offending root path
        path: PathBuf,
        /// Why the root was rejected
        reason: &'static str,
    },

    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::InvalidRoot { path, .. } | Self::PermissionDenied(path) | Self::Io { path, .. } => {
                path
            }
        }
    }
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The path exists but is a directory or special file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path)
            | Self::NotAFile(path)
            | Self::PermissionDenied(path)
            | Self::Io { path, .. } => path,
        }
    }
}
