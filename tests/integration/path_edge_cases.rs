use dupfind::duplicates::{find_duplicates_of, DuplicateFinder};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;
use unicode_normalization::UnicodeNormalization;

#[test]
fn test_paths_with_quotes() {
    let dir = tempdir().unwrap();

    // Windows does not allow double quotes in filenames.
    if cfg!(not(windows)) {
        fs::write(dir.path().join("file_with_\"quote\".txt"), b"content").unwrap();
        fs::write(dir.path().join("duplicate.txt"), b"content").unwrap();

        let (groups, _) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups
            .iter()
            .next()
            .unwrap()
            .paths
            .iter()
            .any(|p| p.to_string_lossy().contains('"')));
    }
}

#[test]
fn test_paths_with_newlines() {
    let dir = tempdir().unwrap();

    // Windows does not allow newlines in filenames.
    if cfg!(not(windows)) {
        fs::write(dir.path().join("file_with\nnewline.txt"), b"content").unwrap();
        fs::write(dir.path().join("duplicate.txt"), b"content").unwrap();

        let (groups, _) = DuplicateFinder::with_defaults()
            .find_duplicates(dir.path())
            .unwrap();

        assert_eq!(groups.len(), 1);
    }
}

#[test]
fn test_extremely_long_paths() {
    let dir = tempdir().unwrap();

    let mut current_path = dir.path().to_path_buf();
    let folder_name = "a".repeat(50);

    // 6 levels of 50-char folders = 300+ chars.
    for i in 0..6 {
        current_path = current_path.join(format!("{i}_{folder_name}"));
        if let Err(e) = fs::create_dir(&current_path) {
            eprintln!("Skipping extremely long path test: failed to create dir: {e}");
            return;
        }
    }

    let file_path = current_path.join("file.txt");
    if let Err(e) = File::create(&file_path).and_then(|mut f| f.write_all(b"content")) {
        eprintln!("Skipping extremely long path test: failed to create file: {e}");
        return;
    }
    fs::write(dir.path().join("duplicate.txt"), b"content").unwrap();

    let (groups, _) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();
    assert_eq!(groups.len(), 1);

    let found = find_duplicates_of(&dir.path().join("duplicate.txt"), dir.path()).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].path.ends_with("file.txt"));
}

#[test]
fn test_unicode_reference_exclusion() {
    let dir = tempdir().unwrap();

    let name_nfc = "café_test.txt";
    let name_nfd = "cafe\u{0301}_test.txt";
    assert_ne!(name_nfc, name_nfd);
    assert_eq!(name_nfc, name_nfd.nfc().collect::<String>());

    let reference = dir.path().join(name_nfc);
    fs::write(&reference, b"content").unwrap();
    if let Err(e) = fs::write(dir.path().join(name_nfd), b"content") {
        eprintln!("Could not create NFD twin (filesystem normalization): {e}");
    }

    // On normalizing filesystems (APFS/HFS+) the second write hits the same
    // file, so only one entry exists.
    let file_count = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .count();

    let found = find_duplicates_of(&reference, dir.path()).unwrap();

    assert_eq!(found.len(), file_count - 1);
    assert!(!found.iter().any(|r| r.path == reference));
}

#[test]
fn test_relative_reference_and_root() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("inner")).unwrap();
    fs::write(dir.path().join("inner/ref.txt"), b"abc").unwrap();
    fs::write(dir.path().join("copy.txt"), b"abc").unwrap();

    // Same file reached through a dotted spelling of the root.
    let root = dir.path().join("inner").join("..");
    let reference = dir.path().join(".").join("inner").join("ref.txt");

    let found = find_duplicates_of(&reference, &root).unwrap();

    assert_eq!(found.len(), 1);
    assert!(found[0].path.ends_with("copy.txt"));
    assert!(!found[0]
        .path
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir)));
}

#[cfg(unix)]
#[test]
fn test_parent_of_linked_root_searches_link_target_parent() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("elsewhere/inner")).unwrap();
    fs::create_dir(dir.path().join("here")).unwrap();
    fs::write(dir.path().join("here/copy_in_here.txt"), b"shared").unwrap();
    fs::write(dir.path().join("elsewhere/copy_in_elsewhere.txt"), b"shared").unwrap();
    fs::write(dir.path().join("elsewhere/ref.txt"), b"shared").unwrap();
    std::os::unix::fs::symlink(dir.path().join("elsewhere/inner"), dir.path().join("here/link"))
        .unwrap();

    let linked = dir.path().join("here/link/..");
    let found = find_duplicates_of(&linked.join("ref.txt"), &linked).unwrap();

    // The reference is recognised under its resolved spelling and the walk
    // stays inside `elsewhere`.
    assert_eq!(found.len(), 1);
    assert!(found[0].path.ends_with("elsewhere/copy_in_elsewhere.txt"));
}
