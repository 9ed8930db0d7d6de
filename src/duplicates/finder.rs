//! Duplicate grouping over scanned file records.
//!
//! # Overview
//!
//! Grouping runs in two steps:
//! 1. **Size bucketing**: records are sorted by size, so files that could
//!    possibly match sit in contiguous runs of equal size. Singleton runs are
//!    dropped without reading a byte.
//! 2. **Digest comparison**: every member of a run is hashed (at most once per
//!    pass, optionally in parallel), then members are paired by digest. All
//!    digests of a run are complete before any membership is decided.
//!
//! Three or more files sharing content land in one group, because the group
//! key is the shared digest.
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, stats) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! for group in &groups {
//!     println!("{} ({} bytes)", group.digest, group.size);
//!     for path in &group.paths {
//!         println!("  {}", path.display());
//!     }
//! }
//! println!("{} bytes reclaimable", stats.wasted_space);
//! ```

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::groups::{DuplicateGroups, GroupingStats};
use crate::scanner::{
    ContentDigest, ErrorPolicy, FileRecord, HashError, Hasher, ScanError, Walker, WalkerConfig,
};

/// Configuration for the duplicate finder.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing; 1 hashes sequentially.
    pub io_threads: usize,
    /// How to treat files that cannot be read.
    pub error_policy: ErrorPolicy,
    /// Read buffer size for hashing.
    pub buffer_size: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            error_policy: ErrorPolicy::Abort,
            buffer_size: crate::scanner::DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FinderConfig {
    /// Set the I/O thread count (minimum 1).
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Set the error policy.
    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the hashing read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}

/// Errors surfaced by grouping and search operations.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The search or scan root is missing or not a directory.
    #[error("Invalid root {path}: {reason}")]
    InvalidRoot {
        /// Offending root path
        path: PathBuf,
        /// Why the root was rejected
        reason: &'static str,
    },

    /// The reference file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The reference path exists but is not a regular file.
    #[error("Not a regular file: {0}")]
    NotAFile(PathBuf),

    /// The tree walk failed on an entry.
    #[error(transparent)]
    Scan(ScanError),

    /// A file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

impl From<ScanError> for FinderError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::InvalidRoot { path, reason } => Self::InvalidRoot { path, reason },
            other => Self::Scan(other),
        }
    }
}

/// Duplicate detection engine.
///
/// Finds duplicates; never decides what to do with them.
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_buffer_size(config.buffer_size);
        Self { config, hasher }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub(crate) fn hasher(&self) -> &Hasher {
        &self.hasher
    }

    /// Scan `root` and group every file under it by content.
    ///
    /// # Errors
    ///
    /// [`FinderError::InvalidRoot`] for a bad root; under
    /// [`ErrorPolicy::Abort`], the first walk or hash failure.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(DuplicateGroups, GroupingStats), FinderError> {
        log::info!("Searching in {}", root.display());

        let outcome = Walker::new(root, WalkerConfig::new(self.config.error_policy)).collect()?;
        let (groups, mut stats) = self.group(outcome.records)?;
        stats.scan_errors = outcome.skipped;
        Ok((groups, stats))
    }

    /// Partition `records` into groups of content-identical files.
    ///
    /// Only digests shared by two or more records produce a group. Records
    /// that share their size with nothing are never read.
    ///
    /// # Errors
    ///
    /// Under [`ErrorPolicy::Abort`], the first [`HashError`].
    pub fn group(
        &self,
        mut records: Vec<FileRecord>,
    ) -> Result<(DuplicateGroups, GroupingStats), FinderError> {
        let mut stats = GroupingStats {
            total_files: records.len(),
            total_size: records.iter().map(|r| r.size).fold(0, u64::saturating_add),
            ..Default::default()
        };
        let mut groups = DuplicateGroups::new();

        records.sort_by_key(|r| r.size);

        let pool = self.build_pool();
        let mut digest_cache: HashMap<PathBuf, ContentDigest> = HashMap::new();

        for run in records.chunk_by(|a, b| a.size == b.size) {
            stats.unique_sizes += 1;
            if run.len() < 2 {
                continue;
            }
            stats.size_candidates += run.len();

            let digests = self.hash_run(run, pool.as_ref(), &mut digest_cache, &mut stats)?;
            assign_run(run, &digests, &mut groups);
        }

        groups.retain_duplicates();

        stats.duplicate_groups = groups.len();
        stats.duplicate_files = groups.file_count();
        stats.wasted_space = groups.wasted_space();

        log::info!(
            "Grouping complete: {} groups, {} files, {} bytes reclaimable",
            stats.duplicate_groups,
            stats.duplicate_files,
            stats.wasted_space
        );

        Ok((groups, stats))
    }

    /// Build the bounded hashing pool, or `None` for sequential hashing.
    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        if self.config.io_threads <= 1 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("Failed to create hashing pool, hashing sequentially: {e}");
                None
            }
        }
    }

    /// Digest every member of a size-equal run, reusing digests already
    /// computed in this pass.
    ///
    /// Returns one entry per run member; `None` marks a member skipped under
    /// [`ErrorPolicy::Skip`].
    fn hash_run(
        &self,
        run: &[FileRecord],
        pool: Option<&rayon::ThreadPool>,
        cache: &mut HashMap<PathBuf, ContentDigest>,
        stats: &mut GroupingStats,
    ) -> Result<Vec<Option<ContentDigest>>, FinderError> {
        let mut seen = HashSet::new();
        let pending: Vec<&Path> = run
            .iter()
            .map(|r| r.path.as_path())
            .filter(|p| !cache.contains_key(*p) && seen.insert(*p))
            .collect();

        log::trace!(
            "Hashing {} of {} files of size {}",
            pending.len(),
            run.len(),
            run[0].size
        );

        let hash_one = |path: &&Path| (path.to_path_buf(), self.hasher.hash(path));
        let results: Vec<(PathBuf, Result<ContentDigest, HashError>)> = match pool {
            Some(pool) => pool.install(|| pending.par_iter().map(hash_one).collect()),
            None => pending.iter().map(hash_one).collect(),
        };

        for (path, result) in results {
            match result {
                Ok(digest) => {
                    stats.hashed_files += 1;
                    cache.insert(path, digest);
                }
                Err(e) => match self.config.error_policy {
                    ErrorPolicy::Abort => return Err(e.into()),
                    ErrorPolicy::Skip => {
                        log::warn!("Skipping unreadable file: {e}");
                        stats.skipped.push(e);
                    }
                },
            }
        }

        Ok(run.iter().map(|r| cache.get(&r.path).copied()).collect())
    }
}

/// Pair members of one size-equal run by digest.
///
/// Each record anchors at most one group: the first unassigned record opens
/// the group for its digest, and every later unassigned record with the same
/// digest joins it.
fn assign_run(run: &[FileRecord], digests: &[Option<ContentDigest>], groups: &mut DuplicateGroups) {
    let mut assigned = vec![false; run.len()];

    for i in 0..run.len() {
        let Some(anchor) = digests[i] else { continue };
        if assigned[i] {
            continue;
        }

        let mut has_duplicate = false;
        for j in (i + 1)..run.len() {
            if assigned[j] || digests[j] != Some(anchor) {
                continue;
            }
            if !has_duplicate {
                groups.insert(anchor, run[i].size, run[i].path.clone());
                has_duplicate = true;
            }
            groups.insert(anchor, run[j].size, run[j].path.clone());
            assigned[j] = true;
        }

        if has_duplicate {
            log::debug!(
                "Duplicate group {}: {} bytes each, anchored at {}",
                anchor,
                run[i].size,
                run[i].path.display()
            );
        }
        assigned[i] = true;
    }
}

/// Group `records` by content with the default configuration.
///
/// # Errors
///
/// The first [`HashError`] encountered.
pub fn group(records: Vec<FileRecord>) -> Result<DuplicateGroups, FinderError> {
    DuplicateFinder::with_defaults()
        .group(records)
        .map(|(groups, _)| groups)
}
