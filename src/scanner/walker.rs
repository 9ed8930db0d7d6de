//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory tree
//! and producing a flat list of [`FileRecord`]s. walkdir keeps its own stack
//! of open directories, so deep trees do not grow the call stack.
//!
//! # Entry handling
//!
//! - Regular files become records with their current size (empty files included)
//! - Directories are descended into
//! - Symbolic links are neither followed nor reported
//! - Sockets, FIFOs and device files are skipped
//! - Unreadable entries abort the walk or are skipped, per [`ErrorPolicy`]
//!
//! Children are visited in file-name order, so output is deterministic.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::scanner::{ErrorPolicy, Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::new(ErrorPolicy::Skip));
//! let outcome = walker.collect().unwrap();
//! println!("{} files, {} skipped", outcome.records.len(), outcome.skipped.len());
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{ErrorPolicy, FileRecord, ScanError, WalkerConfig};

/// Records produced by a completed walk.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Regular files, in traversal order
    pub records: Vec<FileRecord>,
    /// Entries left out under [`ErrorPolicy::Skip`]
    pub skipped: Vec<ScanError>,
}

/// Depth-first directory walker.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// The root is validated when the walk starts, not here.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree, yielding file records in traversal order.
    ///
    /// Per-entry failures are yielded as `Err` items; the iterator itself
    /// never applies the error policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRoot`] if the root does not exist or is
    /// not a directory.
    pub fn walk(&self) -> Result<impl Iterator<Item = Result<FileRecord, ScanError>>, ScanError> {
        let root = validate_root(&self.root)?;
        log::debug!("Walking {}", root.display());

        let iter = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| {
                let entry = match entry_result {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(convert_walk_error(&root, e))),
                };

                let file_type = entry.file_type();
                if file_type.is_dir() {
                    return None;
                }
                if file_type.is_symlink() {
                    log::trace!("Skipping symlink: {}", entry.path().display());
                    return None;
                }
                if !file_type.is_file() {
                    log::trace!("Skipping special file: {}", entry.path().display());
                    return None;
                }

                Some(match entry.metadata() {
                    Ok(metadata) => Ok(FileRecord::new(entry.into_path(), metadata.len())),
                    Err(e) => Err(convert_walk_error(&root, e)),
                })
            });

        Ok(iter)
    }

    /// Walk the whole tree and apply the configured [`ErrorPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidRoot`] for a bad root, or the first
    /// per-entry error under [`ErrorPolicy::Abort`].
    pub fn collect(&self) -> Result<WalkOutcome, ScanError> {
        let mut outcome = WalkOutcome::default();

        for item in self.walk()? {
            match item {
                Ok(record) => outcome.records.push(record),
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Skip => {
                        log::warn!("Skipping unreadable entry: {e}");
                        outcome.skipped.push(e);
                    }
                },
            }
        }

        log::debug!(
            "Walk of {} finished: {} files, {} skipped",
            self.root.display(),
            outcome.records.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }
}

/// Recursively enumerate every regular file under `root`.
///
/// The first unreadable entry aborts the scan.
///
/// # Errors
///
/// [`ScanError::InvalidRoot`] if `root` is missing or not a directory, or the
/// first per-entry failure.
pub fn scan(root: &Path) -> Result<Vec<FileRecord>, ScanError> {
    Walker::new(root, WalkerConfig::default())
        .collect()
        .map(|outcome| outcome.records)
}

/// Check that `root` is an existing directory and return its canonical form.
///
/// A symlink given as the root is followed, and `..` after a link climbs out
/// of the link's target; links below the root are not followed.
///
/// # Errors
///
/// [`ScanError::InvalidRoot`] if the path is missing or not a directory.
pub fn validate_root(root: &Path) -> Result<PathBuf, ScanError> {
    let metadata = match std::fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ScanError::InvalidRoot {
                path: root.to_path_buf(),
                reason: "path does not exist",
            });
        }
        Err(e) => return Err(convert_io_error(root, e)),
    };

    if !metadata.is_dir() {
        return Err(ScanError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory",
        });
    }

    std::fs::canonicalize(root).map_err(|e| convert_io_error(root, e))
}

fn convert_io_error(path: &Path, error: std::io::Error) -> ScanError {
    if error.kind() == ErrorKind::PermissionDenied {
        ScanError::PermissionDenied(path.to_path_buf())
    } else {
        ScanError::Io {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

fn convert_walk_error(root: &Path, error: walkdir::Error) -> ScanError {
    let path = error
        .path()
        .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
    convert_io_error(&path, error.into())
}
