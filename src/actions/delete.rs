//! File removal for confirmed duplicates.
//!
//! # Overview
//!
//! The engine never removes anything; this module is the `delete(path)`
//! primitive the interactive shell calls once a user picks a copy:
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (explicit opt-in)
//! - Size check before removal, so a file rewritten since the scan is kept
//!
//! Removal goes through the [`Remover`] trait so the prompt loop can be
//! driven by a fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::actions::delete::{FsRemover, Remover};
//! use dupfind::scanner::FileRecord;
//! use std::path::PathBuf;
//!
//! let record = FileRecord::new(PathBuf::from("/path/to/copy.txt"), 5);
//! match FsRemover::trash().remove(&record) {
//!     Ok(result) => println!("Removed: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {e}"),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scanner::FileRecord;

/// Error type for removal operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// File size changed since it was scanned.
    #[error("file modified since scan: {0}")]
    Modified(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::Modified(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_io(path: &Path, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Result of a successful removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    /// Path that was removed.
    pub path: PathBuf,
    /// Size of the removed file in bytes.
    pub size: u64,
    /// Whether removal was permanent (true) or to trash (false).
    pub permanent: bool,
}

/// Something that can remove a scanned file.
pub trait Remover {
    /// Remove the file described by `record`.
    ///
    /// # Errors
    ///
    /// A [`DeleteError`] when the file is gone, protected, changed size, or
    /// the underlying removal fails.
    fn remove(&self, record: &FileRecord) -> Result<DeleteResult, DeleteError>;
}

/// Removes files on the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRemover {
    permanent: bool,
}

impl FsRemover {
    /// Remover that moves files to the system trash.
    #[must_use]
    pub fn trash() -> Self {
        Self { permanent: false }
    }

    /// Remover that unlinks files.
    #[must_use]
    pub fn permanent() -> Self {
        Self { permanent: true }
    }

    /// Whether this remover deletes permanently.
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.permanent
    }
}

impl Remover for FsRemover {
    fn remove(&self, record: &FileRecord) -> Result<DeleteResult, DeleteError> {
        let metadata =
            fs::symlink_metadata(&record.path).map_err(|e| DeleteError::from_io(&record.path, e))?;
        if metadata.len() != record.size {
            log::warn!(
                "File modified since scan: {} (size changed from {} to {})",
                record.path.display(),
                record.size,
                metadata.len()
            );
            return Err(DeleteError::Modified(record.path.clone()));
        }

        if self.permanent {
            delete(&record.path)?;
        } else {
            trash::delete(&record.path).map_err(|e| {
                log::error!("Trash operation failed for {}: {}", record.path.display(), e);
                DeleteError::TrashFailed {
                    path: record.path.clone(),
                    message: e.to_string(),
                }
            })?;
            log::info!("Moved to trash: {}", record.path.display());
        }

        Ok(DeleteResult {
            path: record.path.clone(),
            size: record.size,
            permanent: self.permanent,
        })
    }
}

/// Permanently delete a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `Io` for any other failure
pub fn delete(path: &Path) -> Result<(), DeleteError> {
    fs::remove_file(path).map_err(|e| {
        log::error!("Delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;
    log::info!("Permanently deleted: {}", path.display());
    Ok(())
}
