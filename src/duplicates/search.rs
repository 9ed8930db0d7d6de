//! Single-file duplicate search.
//!
//! # Overview
//!
//! Given one reference file and a search root, find every other file in the
//! tree with identical content. The reference's size and digest are computed
//! once up front; the walk then streams candidates, hashing only files whose
//! size matches. No global grouping is built.
//!
//! The reference file itself is never reported, even when it was given as a
//! relative or dotted path.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateSearch;
//! use dupfind::scanner::Hasher;
//! use std::path::Path;
//!
//! let search = DuplicateSearch::new(Path::new("report.pdf"), Path::new("/backups"), Hasher::new()).unwrap();
//! for copy in search.iter().unwrap() {
//!     match copy {
//!         Ok(record) => println!("{}", record.path.display()),
//!         Err(e) => eprintln!("Warning: {e}"),
//!     }
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::finder::{DuplicateFinder, FinderError};
use crate::scanner::path_utils::{canonical_entry, same_entry};
use crate::scanner::walker::validate_root;
use crate::scanner::{
    ContentDigest, ErrorPolicy, FileRecord, HashError, Hasher, Walker, WalkerConfig,
};

/// A prepared search for copies of one reference file.
#[derive(Debug, Clone)]
pub struct DuplicateSearch {
    root: PathBuf,
    reference: PathBuf,
    size: u64,
    digest: ContentDigest,
    hasher: Hasher,
}

impl DuplicateSearch {
    /// Validate both inputs and hash the reference file.
    ///
    /// # Errors
    ///
    /// - [`FinderError::InvalidRoot`] if `root` is missing or not a directory
    /// - [`FinderError::FileNotFound`] if `reference` does not exist
    /// - [`FinderError::NotAFile`] if `reference` is not a regular file
    /// - [`FinderError::Hash`] if the reference cannot be read
    pub fn new(reference: &Path, root: &Path, hasher: Hasher) -> Result<Self, FinderError> {
        let root = validate_root(root)?;

        let metadata = match std::fs::symlink_metadata(reference) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FinderError::FileNotFound(reference.to_path_buf()));
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(HashError::PermissionDenied(reference.to_path_buf()).into());
            }
            Err(e) => {
                return Err(HashError::Io {
                    path: reference.to_path_buf(),
                    source: e,
                }
                .into());
            }
        };
        if !metadata.is_file() {
            return Err(FinderError::NotAFile(reference.to_path_buf()));
        }

        let digest = hasher.hash(reference).map_err(|e| match e {
            HashError::NotFound(p) => FinderError::FileNotFound(p),
            HashError::NotAFile(p) => FinderError::NotAFile(p),
            other => FinderError::Hash(other),
        })?;

        let reference = canonical_entry(reference).map_err(|e| HashError::Io {
            path: reference.to_path_buf(),
            source: e,
        })?;
        log::debug!(
            "Reference {} ({} bytes, {})",
            reference.display(),
            metadata.len(),
            digest
        );

        Ok(Self {
            root,
            reference,
            size: metadata.len(),
            digest,
            hasher,
        })
    }

    /// Absolute path of the reference file.
    #[must_use]
    pub fn reference(&self) -> &Path {
        &self.reference
    }

    /// Size of the reference file in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Digest of the reference file.
    #[must_use]
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Stream copies of the reference file in depth-first traversal order.
    ///
    /// Per-entry walk or hash failures are yielded as `Err` items.
    ///
    /// # Errors
    ///
    /// [`FinderError::InvalidRoot`] if the root disappeared since
    /// construction.
    pub fn iter(
        &self,
    ) -> Result<impl Iterator<Item = Result<FileRecord, FinderError>> + '_, FinderError> {
        let walk = Walker::new(&self.root, WalkerConfig::default()).walk()?;

        Ok(walk.filter_map(move |item| match item {
            Ok(record) => self.check_candidate(record).transpose(),
            Err(e) => Some(Err(e.into())),
        }))
    }

    /// Decide whether one walked file is a copy of the reference.
    fn check_candidate(&self, record: FileRecord) -> Result<Option<FileRecord>, FinderError> {
        if record.size != self.size || same_entry(&record.path, &self.reference) {
            return Ok(None);
        }

        let digest = self.hasher.hash(&record.path)?;
        if digest == self.digest {
            log::debug!("Copy found: {}", record.path.display());
            Ok(Some(record))
        } else {
            log::trace!("Same size, different content: {}", record.path.display());
            Ok(None)
        }
    }
}

/// Copies found by a completed search.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Absolute path of the reference file
    pub reference: PathBuf,
    /// Size of the reference file in bytes
    pub size: u64,
    /// Digest of the reference file
    pub digest: ContentDigest,
    /// Copies of the reference, in traversal order
    pub matches: Vec<FileRecord>,
    /// Entries left out under the skip policy
    pub skipped: Vec<FinderError>,
}

impl DuplicateFinder {
    /// Find every file under `root` with the same content as `reference`.
    ///
    /// # Errors
    ///
    /// Input validation errors from [`DuplicateSearch::new`]; under
    /// [`ErrorPolicy::Abort`], the first walk or hash failure.
    pub fn find_duplicates_of(
        &self,
        reference: &Path,
        root: &Path,
    ) -> Result<SearchOutcome, FinderError> {
        log::info!(
            "Searching {} for copies of {}",
            root.display(),
            reference.display()
        );

        let search = DuplicateSearch::new(reference, root, self.hasher().clone())?;
        let mut outcome = SearchOutcome {
            reference: search.reference().to_path_buf(),
            size: search.size(),
            digest: search.digest(),
            matches: Vec::new(),
            skipped: Vec::new(),
        };

        for item in search.iter()? {
            match item {
                Ok(record) => outcome.matches.push(record),
                Err(e) => match self.config().error_policy {
                    ErrorPolicy::Abort => return Err(e),
                    ErrorPolicy::Skip => {
                        log::warn!("Skipping unreadable entry: {e}");
                        outcome.skipped.push(e);
                    }
                },
            }
        }

        log::info!("Search complete: {} copies found", outcome.matches.len());
        Ok(outcome)
    }
}

/// Find every copy of `reference` under `root`, aborting on the first failure.
///
/// # Errors
///
/// See [`DuplicateFinder::find_duplicates_of`].
pub fn find_duplicates_of(reference: &Path, root: &Path) -> Result<Vec<FileRecord>, FinderError> {
    DuplicateFinder::with_defaults()
        .find_duplicates_of(reference, root)
        .map(|outcome| outcome.matches)
}
