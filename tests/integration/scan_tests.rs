use dupfind::duplicates::{DuplicateFinder, FinderConfig};
use dupfind::scanner::{ErrorPolicy, Walker, WalkerConfig};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (groups, stats) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.duplicate_groups, 0);
    assert!(!stats.is_partial());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();

    File::create(dir.path().join("a.txt"))
        .unwrap()
        .write_all(b"content a")
        .unwrap();
    File::create(dir.path().join("b.txt"))
        .unwrap()
        .write_all(b"content b")
        .unwrap();
    File::create(dir.path().join("c.txt"))
        .unwrap()
        .write_all(b"content c")
        .unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, stats) = finder.find_duplicates(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert_eq!(stats.total_files, 3);
    assert_eq!(stats.size_candidates, 3);
    assert_eq!(stats.hashed_files, 3);
}

#[test]
fn test_scan_distinct_sizes_are_never_hashed() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("one"), b"1").unwrap();
    fs::write(dir.path().join("two"), b"22").unwrap();
    fs::write(dir.path().join("three"), b"333").unwrap();

    let (groups, stats) = DuplicateFinder::with_defaults()
        .find_duplicates(dir.path())
        .unwrap();

    assert!(groups.is_empty());
    assert_eq!(stats.unique_sizes, 3);
    assert_eq!(stats.hashed_files, 0);
    assert!((stats.size_elimination_rate() - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("subdir");
    fs::create_dir(&sub).unwrap();

    fs::write(dir.path().join("a.txt"), b"dup").unwrap();
    fs::write(sub.join("b.txt"), b"dup").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (groups, stats) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    let group = groups.iter().next().unwrap();
    assert_eq!(group.len(), 2);
    assert!(group.paths.iter().all(|p| p.is_absolute()));
    assert_eq!(stats.total_files, 2);
}

#[test]
fn test_scan_multiple_groups() {
    let dir = tempdir().unwrap();

    for name in ["1a.txt", "1b.txt", "1c.txt"] {
        fs::write(dir.path().join(name), b"group1").unwrap();
    }
    for name in ["2a.txt", "2b.txt"] {
        fs::write(dir.path().join(name), b"group2").unwrap();
    }

    let finder = DuplicateFinder::with_defaults();
    let (groups, stats) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(stats.duplicate_groups, 2);
    assert_eq!(stats.duplicate_files, 5);
    assert_eq!(stats.wasted_space, 6 * 3);
}

#[test]
fn test_walker_matches_scan() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("a.txt"), b"x").unwrap();
    fs::write(dir.path().join("b/c.txt"), b"yy").unwrap();

    let walked: Vec<_> = Walker::new(dir.path(), WalkerConfig::new(ErrorPolicy::Skip))
        .walk()
        .unwrap()
        .map(Result::unwrap)
        .collect();
    let scanned = dupfind::scanner::scan(dir.path()).unwrap();

    assert_eq!(walked, scanned);
    assert_eq!(scanned[0].size, 1);
    assert_eq!(scanned[1].size, 2);
}

#[test]
fn test_small_buffer_same_result() {
    let dir = tempdir().unwrap();
    let big = vec![7u8; 200_000];
    fs::write(dir.path().join("big1"), &big).unwrap();
    fs::write(dir.path().join("big2"), &big).unwrap();
    let mut changed = big.clone();
    changed[199_999] = 8;
    fs::write(dir.path().join("big3"), &changed).unwrap();

    let finder = DuplicateFinder::new(FinderConfig::default().with_buffer_size(13));
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups.iter().next().unwrap().len(), 2);
}
