use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use xxdupe::duplicates::{DuplicateFinder, FinderConfig};
use xxdupe::report::{GroupReporter, ReportOptions};
use xxdupe::scanner::{fingerprint_bytes, SizeBounds};

fn write(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let (index, summary) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert!(index.is_empty());
    assert_eq!(summary.files_found, 0);
    assert_eq!(summary.files_hashed, 0);
    assert!(!summary.has_warnings());
}

#[test]
fn test_scan_unique_files() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", b"content a");
    write(dir.path(), "b.txt", b"content b");
    write(dir.path(), "c.txt", b"content c");

    let finder = DuplicateFinder::with_defaults();
    let (index, summary) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(summary.files_found, 3);
    assert_eq!(summary.bytes_found, 27);

    let report = GroupReporter::default().build(index);
    assert!(!report.index_empty);
    assert!(!report.has_duplicates());
}

#[test]
fn test_scan_duplicate_files() {
    let dir = tempdir().unwrap();
    let a = write(dir.path(), "a.txt", b"hello");
    let b = write(dir.path(), "b.txt", b"hello");
    write(dir.path(), "c.txt", b"world");
    set_file_mtime(&a, FileTime::from_unix_time(1_000, 0)).unwrap();
    set_file_mtime(&b, FileTime::from_unix_time(2_000, 0)).unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (index, _) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();
    let hello = index.members(&fingerprint_bytes(b"hello")).unwrap();
    assert_eq!(hello.len(), 2);

    let report = GroupReporter::default().build(index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.num_dupes, 1);
    assert_eq!(report.dupes_size, 5);

    let group = &report.groups[0];
    assert_eq!(group.fingerprint, fingerprint_bytes(b"hello"));
    assert!(group.members[0].path.ends_with("b.txt"));
    assert!(group.members[1].path.ends_with("a.txt"));
}

#[test]
fn test_scan_nested_directories() {
    let dir = tempdir().unwrap();
    write(dir.path(), "top.bin", b"nested copy");
    write(dir.path(), "one/two/three/deep.bin", b"nested copy");
    write(dir.path(), "one/other.bin", b"different");

    let finder = DuplicateFinder::with_defaults();
    let (index, summary) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 3);
    let report = GroupReporter::default().build(index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members.len(), 2);
}

#[test]
fn test_scan_paths_are_absolute() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a", b"same");
    write(dir.path(), "b", b"same");

    let finder = DuplicateFinder::with_defaults();
    let (index, _) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    for group in index.into_groups() {
        for member in group.members {
            assert!(member.path.is_absolute(), "{}", member.path.display());
        }
    }
}

#[test]
fn test_size_bounds_are_exclusive() {
    let dir = tempdir().unwrap();
    write(dir.path(), "ten_a", &[1u8; 10]);
    write(dir.path(), "ten_b", &[1u8; 10]);
    write(dir.path(), "twenty_a", &[2u8; 20]);
    write(dir.path(), "twenty_b", &[2u8; 20]);
    write(dir.path(), "thirty_a", &[3u8; 30]);
    write(dir.path(), "thirty_b", &[3u8; 30]);

    let config = FinderConfig::default().with_bounds(SizeBounds::new(10, 30));
    let finder = DuplicateFinder::new(config);
    let (index, summary) = finder
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 2);
    let groups = index.into_groups();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].reference_size, 20);
}

#[test]
fn test_hide_recent_over_real_files() {
    let dir = tempdir().unwrap();
    let old = write(dir.path(), "old.txt", b"copy");
    let new = write(dir.path(), "new.txt", b"copy");
    set_file_mtime(&old, FileTime::from_unix_time(1_000, 0)).unwrap();
    set_file_mtime(&new, FileTime::from_unix_time(9_000, 0)).unwrap();

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();
    let report = GroupReporter::new(ReportOptions {
        hide_recent: true,
        ..ReportOptions::default()
    })
    .build(index);

    let group = &report.groups[0];
    assert!(group.kept.as_ref().unwrap().path.ends_with("new.txt"));
    assert_eq!(group.members.len(), 1);
    assert!(group.members[0].path.ends_with("old.txt"));
    assert_eq!(report.num_dupes, 1);
}

#[test]
fn test_groups_ordered_by_size() {
    let dir = tempdir().unwrap();
    write(dir.path(), "big1", &[9u8; 300]);
    write(dir.path(), "big2", &[9u8; 300]);
    write(dir.path(), "small1", &[7u8; 3]);
    write(dir.path(), "small2", &[7u8; 3]);
    write(dir.path(), "mid1", &[8u8; 30]);
    write(dir.path(), "mid2", &[8u8; 30]);

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();
    let report = GroupReporter::default().build(index);

    let sizes: Vec<u64> = report.groups.iter().map(|g| g.reference_size).collect();
    assert_eq!(sizes, vec![3, 30, 300]);
    assert_eq!(report.num_dupes, 3);
    assert_eq!(report.dupes_size, 333);
}
