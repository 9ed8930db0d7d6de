//! Output formatters for duplicate results.
//!
//! - Text: numbered groups or one copy per line, for people
//! - JSON: for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupfind::duplicates::DuplicateFinder;
//! use dupfind::error::ExitCode;
//! use dupfind::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, stats) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! JsonOutput::new(&groups, &stats, ExitCode::Success)
//!     .write_to(&mut std::io::stdout())
//!     .unwrap();
//! ```

pub mod json;
pub mod text;

pub use json::{JsonOutput, JsonSearchOutput};
