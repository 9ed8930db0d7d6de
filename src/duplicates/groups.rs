//! Duplicate groups keyed by content digest.
//!
//! # Overview
//!
//! A [`DuplicateGroup`] is the maximal set of files sharing one
//! [`ContentDigest`]. [`DuplicateGroups`] is the mapping produced by a grouping
//! pass: digest to ordered member paths, where order is discovery order.
//!
//! # Example
//!
//! ```
//! use dupfind::duplicates::DuplicateGroups;
//! use dupfind::scanner::ContentDigest;
//! use std::path::PathBuf;
//!
//! let digest = ContentDigest::from_bytes([7; 32]);
//! let mut groups = DuplicateGroups::new();
//! groups.insert(digest, 5, PathBuf::from("/a.txt"));
//! groups.insert(digest, 5, PathBuf::from("/b.txt"));
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups.get(&digest).unwrap().len(), 2);
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::scanner::{ContentDigest, HashError, ScanError};

/// Files sharing one content digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// SHA-256 digest of every member's content
    pub digest: ContentDigest,
    /// File size in bytes (shared by all members)
    pub size: u64,
    /// Member paths in discovery order
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Create an empty group for `digest`.
    #[must_use]
    pub fn new(digest: ContentDigest, size: u64) -> Self {
        Self {
            digest,
            size,
            paths: Vec::new(),
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of redundant copies (total - 1 original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.paths.len().saturating_sub(1)
    }

    /// Bytes that removing every redundant copy would free.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size.saturating_mul(self.duplicate_count() as u64)
    }

    /// Check whether `path` is a member.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

/// Mapping from content digest to the group of files sharing it.
///
/// Groups iterate in the order their digest was first inserted.
#[derive(Debug, Clone, Default)]
pub struct DuplicateGroups {
    groups: Vec<DuplicateGroup>,
    index: HashMap<ContentDigest, usize>,
}

impl DuplicateGroups {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` to the group for `digest`, opening the group if needed.
    ///
    /// Paths already in the group are not added twice.
    pub fn insert(&mut self, digest: ContentDigest, size: u64, path: PathBuf) {
        let idx = *self.index.entry(digest).or_insert_with(|| {
            self.groups.push(DuplicateGroup::new(digest, size));
            self.groups.len() - 1
        });

        let group = &mut self.groups[idx];
        debug_assert_eq!(
            group.size, size,
            "File size {} doesn't match group size {}",
            size, group.size
        );
        if !group.contains(&path) {
            group.paths.push(path);
        }
    }

    /// Look up the group for `digest`.
    #[must_use]
    pub fn get(&self, digest: &ContentDigest) -> Option<&DuplicateGroup> {
        self.index.get(digest).map(|&idx| &self.groups[idx])
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate groups in first-discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, DuplicateGroup> {
        self.groups.iter()
    }

    /// Group for the file at `path`, if it has any duplicate.
    #[must_use]
    pub fn group_of(&self, path: &Path) -> Option<&DuplicateGroup> {
        self.groups.iter().find(|g| g.contains(path))
    }

    /// Membership as sets, for order-insensitive comparison of two passes.
    #[must_use]
    pub fn membership(&self) -> BTreeSet<BTreeSet<PathBuf>> {
        self.groups
            .iter()
            .map(|g| g.paths.iter().cloned().collect())
            .collect()
    }

    /// Total number of files across all groups.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.iter().map(DuplicateGroup::len).sum()
    }

    /// Total bytes reclaimable across all groups.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.groups
            .iter()
            .map(DuplicateGroup::wasted_space)
            .fold(0, u64::saturating_add)
    }

    /// Drop groups that ended up with fewer than two members.
    pub(crate) fn retain_duplicates(&mut self) {
        self.groups.retain(|g| g.len() > 1);
        self.index = self
            .groups
            .iter()
            .enumerate()
            .map(|(idx, g)| (g.digest, idx))
            .collect();
    }
}

impl IntoIterator for DuplicateGroups {
    type Item = DuplicateGroup;
    type IntoIter = std::vec::IntoIter<DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::slice::Iter<'a, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Statistics from a grouping pass.
#[derive(Debug, Default)]
pub struct GroupingStats {
    /// Total number of records received
    pub total_files: usize,
    /// Total size of all records in bytes
    pub total_size: u64,
    /// Number of distinct file sizes
    pub unique_sizes: usize,
    /// Records sharing their size with at least one other record
    pub size_candidates: usize,
    /// Digests computed (each record hashed at most once)
    pub hashed_files: usize,
    /// Number of duplicate groups found
    pub duplicate_groups: usize,
    /// Number of files across all duplicate groups
    pub duplicate_files: usize,
    /// Bytes reclaimable by keeping one copy per group
    pub wasted_space: u64,
    /// Records left out under the skip policy because they could not be hashed
    pub skipped: Vec<HashError>,
    /// Entries the tree walk left out under the skip policy
    pub scan_errors: Vec<ScanError>,
}

impl GroupingStats {
    /// Whether anything was left out of the pass.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty() || !self.scan_errors.is_empty()
    }

    /// Percentage of records eliminated by size alone.
    #[must_use]
    pub fn size_elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            ((self.total_files - self.size_candidates) as f64 / self.total_files as f64) * 100.0
        }
    }
}
