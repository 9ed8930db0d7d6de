//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Whole-tree grouping: size bucketing, then digest comparison ([`finder`])
//! - Digest-keyed duplicate groups ([`groups`])
//! - Single-file search for copies of one reference file ([`search`])

pub mod finder;
pub mod groups;
pub mod search;

pub use finder::{group, DuplicateFinder, FinderConfig, FinderError};
pub use groups::{DuplicateGroup, DuplicateGroups, GroupingStats};
pub use search::{find_duplicates_of, DuplicateSearch, SearchOutcome};
