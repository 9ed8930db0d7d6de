//! Command-line interface definitions for dupfind.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, config file, error format) apply to every subcommand.
//!
//! Flags that also exist as configuration keys are `Option`s here so that an
//! absent flag leaves the configured value in place.
//!
//! # Example
//!
//! ```bash
//! # Group every duplicate under a directory
//! dupfind group ~/Downloads
//!
//! # Same, as JSON for scripting
//! dupfind group ~/Downloads --output json
//!
//! # List copies of one file, then remove some of them interactively
//! dupfind find ~/report.pdf ~/backups --remove
//!
//! # Verbose mode for debugging
//! dupfind -v group ~/Downloads
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate files by content.
///
/// dupfind groups files with identical bytes (compared by size, then SHA-256),
/// or lists every copy of a single reference file.
#[derive(Debug, Parser)]
#[command(name = "dupfind")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Report fatal errors as a JSON object on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for dupfind.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Group all files under a directory by identical content
    Group(GroupArgs),
    /// Find every copy of one file under a directory
    Find(FindArgs),
}

/// Options shared by both subcommands.
#[derive(Debug, Default, Args)]
pub struct CommonArgs {
    /// Output format (text for people, json for scripting)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of I/O threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Skip unreadable files and directories instead of aborting
    #[arg(long)]
    pub skip_errors: bool,
}

/// Arguments for the group subcommand.
#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Directory to scan for duplicates
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the find subcommand.
#[derive(Debug, Args)]
pub struct FindArgs {
    /// Reference file whose copies are wanted
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Directory to search
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    /// Interactively choose copies to remove
    #[arg(long)]
    pub remove: bool,

    /// Use permanent deletion instead of moving to trash
    ///
    /// Warning: Files cannot be recovered after permanent deletion.
    #[arg(long, requires = "remove")]
    pub permanent: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Commands {
    /// Options shared by every subcommand.
    #[must_use]
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Group(args) => &args.common,
            Commands::Find(args) => &args.common,
        }
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one path per line
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_help() {
        // --help causes an early exit, which is an error in try_parse_from
        let result = Cli::try_parse_from(["dupfind", "--help"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_group_basic() {
        let cli = Cli::try_parse_from(["dupfind", "group", "/some/path"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        match cli.command {
            Commands::Group(args) => {
                assert_eq!(args.path, PathBuf::from("/some/path"));
                assert_eq!(args.common.output, None);
                assert_eq!(args.common.io_threads, None);
                assert!(!args.common.skip_errors);
            }
            Commands::Find(_) => panic!("Expected Group command"),
        }
    }

    #[test]
    fn test_cli_parse_group_options() {
        let cli = Cli::try_parse_from([
            "dupfind",
            "group",
            "/data",
            "--output",
            "json",
            "--io-threads",
            "8",
            "--skip-errors",
        ])
        .unwrap();
        let common = cli.command.common();
        assert_eq!(common.output, Some(OutputFormat::Json));
        assert_eq!(common.io_threads, Some(8));
        assert!(common.skip_errors);
    }

    #[test]
    fn test_cli_parse_find() {
        let cli = Cli::try_parse_from(["dupfind", "find", "a.txt", "/data", "--remove"]).unwrap();
        match cli.command {
            Commands::Find(args) => {
                assert_eq!(args.file, PathBuf::from("a.txt"));
                assert_eq!(args.path, PathBuf::from("/data"));
                assert!(args.remove);
                assert!(!args.permanent);
            }
            Commands::Group(_) => panic!("Expected Find command"),
        }
    }

    #[test]
    fn test_permanent_requires_remove() {
        let result = Cli::try_parse_from(["dupfind", "find", "a.txt", "/data", "--permanent"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_requires_both_paths() {
        assert!(Cli::try_parse_from(["dupfind", "find", "a.txt"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dupfind",
            "group",
            "/data",
            "-vv",
            "--json-errors",
            "--config",
            "/etc/dupfind.toml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.json_errors);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/dupfind.toml")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dupfind", "-q", "-v", "group", "/data"]).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
