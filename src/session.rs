//! Removal session for reviewing copies of a file.
//!
//! A [`RemovalSession`] is the list of copies still awaiting a decision. It is
//! a plain value: removing an entry returns a new, smaller session and leaves
//! the original untouched, so each prompt step receives the session explicitly
//! instead of sharing mutable state.
//!
//! # Example
//!
//! ```
//! use dupfind::scanner::FileRecord;
//! use dupfind::session::RemovalSession;
//! use std::path::PathBuf;
//!
//! let session = RemovalSession::new(vec![
//!     FileRecord::new(PathBuf::from("/a/copy.txt"), 5),
//!     FileRecord::new(PathBuf::from("/b/copy.txt"), 5),
//! ]);
//! let smaller = session.without(0).unwrap();
//!
//! assert_eq!(session.len(), 2);
//! assert_eq!(smaller.len(), 1);
//! ```

use thiserror::Error;

use crate::actions::delete::{DeleteError, DeleteResult, Remover};
use crate::scanner::FileRecord;

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested position is not in the session.
    #[error("no pending file at position {index} (session holds {len})")]
    IndexOutOfRange {
        /// Zero-based position requested
        index: usize,
        /// Number of pending files
        len: usize,
    },

    /// The remover refused or failed.
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Copies still awaiting a keep-or-remove decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSession {
    pending: Vec<FileRecord>,
}

impl RemovalSession {
    /// Start a session over `pending`.
    #[must_use]
    pub fn new(pending: Vec<FileRecord>) -> Self {
        Self { pending }
    }

    /// Files still pending, in their original order.
    #[must_use]
    pub fn pending(&self) -> &[FileRecord] {
        &self.pending
    }

    /// Number of pending files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is left to review.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending file at zero-based `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FileRecord> {
        self.pending.get(index)
    }

    /// A new session without the entry at `index`.
    ///
    /// # Errors
    ///
    /// [`SessionError::IndexOutOfRange`] if `index` is past the end.
    pub fn without(&self, index: usize) -> Result<Self, SessionError> {
        self.check_index(index)?;
        let pending = self
            .pending
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, record)| record.clone())
            .collect();
        Ok(Self { pending })
    }

    /// Remove the file at `index` from disk and return the reduced session.
    ///
    /// If removal fails the file stays pending; the caller keeps using the
    /// current session.
    ///
    /// # Errors
    ///
    /// [`SessionError::IndexOutOfRange`] or [`SessionError::Delete`].
    pub fn remove_with(
        &self,
        index: usize,
        remover: &dyn Remover,
    ) -> Result<(Self, DeleteResult), SessionError> {
        self.check_index(index)?;
        let result = remover.remove(&self.pending[index])?;
        Ok((self.without(index)?, result))
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index < self.pending.len() {
            Ok(())
        } else {
            Err(SessionError::IndexOutOfRange {
                index,
                len: self.pending.len(),
            })
        }
    }
}
