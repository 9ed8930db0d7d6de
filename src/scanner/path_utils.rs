//! Canonical paths and Unicode-aware comparison keys.
//!
//! Records always carry absolute paths, and the single-file search must
//! recognise the reference file when the walk reaches it again. Two spellings
//! can name the same file:
//!
//! - relative, dotted or linked vs. canonical (`./link/../b.txt` vs. `/home/me/b.txt`)
//! - NFC vs. NFD Unicode (macOS stores `café` decomposed)
//!
//! [`canonical_entry`] fixes the first by asking the filesystem for the
//! parent directory, and [`path_key`] folds the second. [`same_entry`]
//! applies the folding only where the filesystem does.
//!
//! # Example
//!
//! ```
//! use dupfind::scanner::path_utils::paths_equal_normalized;
//! use std::path::Path;
//!
//! let nfc = Path::new("café.txt");       // é is U+00E9
//! let nfd = Path::new("cafe\u{0301}.txt"); // e + combining accent
//! assert!(paths_equal_normalized(nfc, nfd));
//! ```

use std::io;
use std::path::{Component, Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Normalize a path string to NFC (Composed) form.
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Resolve the directory holding `path` and rejoin its final component.
///
/// `..` is resolved after the links before it, as the kernel does. The final
/// component itself is kept as spelled, so a symlink is not replaced by its
/// target.
///
/// # Errors
///
/// Fails if the parent cannot be resolved or `path` has no final name (`/`, `a/..`).
pub fn canonical_entry(path: &Path) -> io::Result<PathBuf> {
    let name = match path.components().next_back() {
        Some(Component::Normal(name)) => name,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "path does not end in a file name",
            ))
        }
    };
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    Ok(std::fs::canonicalize(parent)?.join(name))
}

/// Create a normalized comparison key for a path.
///
/// Paths with invalid UTF-8 fall back to a lossy conversion.
#[must_use]
pub fn path_key(path: &Path) -> String {
    normalize_path_str(&path.to_string_lossy())
}

/// Check if two [`Path`]s are equal after NFC normalization.
#[must_use]
pub fn paths_equal_normalized(a: &Path, b: &Path) -> bool {
    path_key(a) == path_key(b)
}

/// Whether two absolute paths name the same directory entry.
///
/// Byte-equal paths always do. NFC-equal spellings only count on macOS,
/// whose filesystems fold normalization; elsewhere they are distinct files.
#[must_use]
pub fn same_entry(a: &Path, b: &Path) -> bool {
    a == b || (cfg!(target_os = "macos") && paths_equal_normalized(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_str_nfd_to_nfc() {
        let nfd = "re\u{0301}sume\u{0301}.txt";
        assert_eq!(normalize_path_str(nfd), "résumé.txt");
    }

    #[test]
    fn test_normalize_path_str_ascii_unchanged() {
        assert_eq!(normalize_path_str("hello.txt"), "hello.txt");
        assert_eq!(normalize_path_str(""), "");
    }

    #[test]
    fn test_canonical_entry_relative() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), b"x").unwrap();
        let canonical_dir = std::fs::canonicalize(dir.path()).unwrap();

        let dotted = dir.path().join(".").join("sub").join("..").join("b.txt");
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        assert_eq!(canonical_entry(&dotted).unwrap(), canonical_dir.join("b.txt"));
    }

    #[test]
    fn test_canonical_entry_bare_name() {
        let cwd = std::fs::canonicalize(".").unwrap();
        assert_eq!(canonical_entry(Path::new("b.txt")).unwrap(), cwd.join("b.txt"));
    }

    #[test]
    fn test_canonical_entry_rejects_trailing_parent() {
        let err = canonical_entry(Path::new("a/..")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[cfg(unix)]
    #[test]
    fn test_canonical_entry_keeps_final_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("target.txt"), b"x").unwrap();
        std::os::unix::fs::symlink("target.txt", dir.path().join("link.txt")).unwrap();

        let entry = canonical_entry(&dir.path().join("link.txt")).unwrap();
        assert!(entry.ends_with("link.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_canonical_entry_parent_after_link() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("elsewhere/inner")).unwrap();
        std::fs::create_dir(dir.path().join("here")).unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("elsewhere/inner"),
            dir.path().join("here/link"),
        )
        .unwrap();

        let entry = canonical_entry(&dir.path().join("here/link/../f.txt")).unwrap();
        let expected = std::fs::canonicalize(dir.path().join("elsewhere")).unwrap();
        assert_eq!(entry, expected.join("f.txt"));
    }

    #[test]
    fn test_paths_equal_normalized() {
        let a = Path::new("español.txt");
        let b = Path::new("espan\u{0303}ol.txt");
        assert!(paths_equal_normalized(a, b));
        assert!(!paths_equal_normalized(a, Path::new("other.txt")));
    }

    #[test]
    fn test_same_entry() {
        let nfc = Path::new("/data/café.txt");
        let nfd = Path::new("/data/cafe\u{0301}.txt");
        assert!(same_entry(nfc, nfc));
        assert_eq!(same_entry(nfc, nfd), cfg!(target_os = "macos"));
        assert!(!same_entry(nfc, Path::new("/data/other.txt")));
    }

    #[test]
    fn test_path_key_hangul() {
        assert_eq!(
            path_key(Path::new("가.txt")),
            path_key(Path::new("\u{1100}\u{1161}.txt"))
        );
    }
}
