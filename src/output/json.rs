//! JSON output formatter.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! Grouping:
//!
//! ```json
//! {
//!   "duplicates": [
//!     { "digest": "2cf24d...", "size": 5, "files": ["/a.txt", "/b.txt"] }
//!   ],
//!   "summary": {
//!     "total_files": 4,
//!     "total_size": 17,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 2,
//!     "reclaimable_space": 5,
//!     "skipped": 0,
//!     "exit_code": 0,
//!     "exit_code_name": "DF000"
//!   }
//! }
//! ```
//!
//! Single-file search:
//!
//! ```json
//! { "reference": "/a.txt", "digest": "2cf24d...", "size": 5, "copies": ["/b.txt"], "skipped": 0 }
//! ```

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, DuplicateGroups, GroupingStats, SearchOutcome};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// SHA-256 digest as hexadecimal string (64 characters)
    pub digest: String,
    /// File size in bytes
    pub size: u64,
    /// Absolute paths to all duplicate files
    pub files: Vec<String>,
}

impl From<&DuplicateGroup> for JsonDuplicateGroup {
    fn from(group: &DuplicateGroup) -> Self {
        Self {
            digest: group.digest.to_hex(),
            size: group.size,
            files: group.paths.iter().map(|p| path_string(p)).collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of files scanned
    pub total_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Number of files across all groups
    pub duplicate_files: usize,
    /// Space reclaimable by keeping one copy per group (bytes)
    pub reclaimable_space: u64,
    /// Entries left out under the skip policy
    pub skipped: usize,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DF000")
    pub exit_code_name: String,
}

/// Complete JSON output for a grouping run.
#[derive(Debug, Clone, Serialize)]
pub struct JsonOutput {
    /// List of duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Summary statistics
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON document for a grouping run.
    #[must_use]
    pub fn new(groups: &DuplicateGroups, stats: &GroupingStats, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from).collect(),
            summary: JsonSummary {
                total_files: stats.total_files,
                total_size: stats.total_size,
                duplicate_groups: stats.duplicate_groups,
                duplicate_files: stats.duplicate_files,
                reclaimable_space: stats.wasted_space,
                skipped: stats.skipped.len() + stats.scan_errors.len(),
                exit_code: exit_code.as_i32(),
                exit_code_name: exit_code.code_prefix().to_string(),
            },
        }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// JSON output for a single-file search.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSearchOutput {
    /// Absolute path of the reference file
    pub reference: String,
    /// Digest of the reference file
    pub digest: String,
    /// Size of the reference file in bytes
    pub size: u64,
    /// Copies found, in traversal order
    pub copies: Vec<String>,
    /// Entries left out under the skip policy
    pub skipped: usize,
}

impl JsonSearchOutput {
    /// Build the JSON document for a search.
    #[must_use]
    pub fn new(outcome: &SearchOutcome) -> Self {
        Self {
            reference: path_string(&outcome.reference),
            digest: outcome.digest.to_hex(),
            size: outcome.size,
            copies: outcome.matches.iter().map(|r| path_string(&r.path)).collect(),
            skipped: outcome.skipped.len(),
        }
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writeln!(writer)?;
        Ok(())
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
