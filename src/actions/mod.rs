//! File actions module.
//!
//! The detection engine only reports duplicates. Acting on them lives here:
//! - Move to system trash (default, recoverable)
//! - Permanent deletion (explicit opt-in)
//!
//! ```no_run
//! use dupfind::actions::delete::delete;
//! use std::path::Path;
//!
//! delete(Path::new("/path/to/duplicate.txt")).unwrap();
//! ```

pub mod delete;

pub use delete::{delete, DeleteError, DeleteResult, FsRemover, Remover};
