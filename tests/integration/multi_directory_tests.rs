use std::fs;
use tempfile::tempdir;
use xxdupe::duplicates::DuplicateFinder;
use xxdupe::report::GroupReporter;

#[test]
fn test_scan_two_non_overlapping_directories() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    fs::write(dir1.path().join("a.txt"), b"dup").unwrap();
    fs::write(dir2.path().join("b.txt"), b"dup").unwrap();

    let finder = DuplicateFinder::with_defaults();
    let (index, summary) = finder
        .find_duplicates(&[dir1.path().to_path_buf(), dir2.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 2);
    let report = GroupReporter::default().build(index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members.len(), 2);
}

#[test]
fn test_cross_directory_duplicate_detection() {
    let dirs: Vec<_> = (0..3).map(|_| tempdir().unwrap()).collect();
    for (i, dir) in dirs.iter().enumerate() {
        fs::write(dir.path().join(format!("{i}.txt")), b"triple").unwrap();
    }

    let roots: Vec<_> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&roots)
        .unwrap();
    let report = GroupReporter::default().build(index);

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members.len(), 3);
    assert_eq!(report.num_dupes, 2);
}

#[test]
fn test_overlapping_roots_are_scanned_twice() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("only.txt"), b"single file").unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf(), sub.clone()])
        .unwrap();

    // Each root is walked independently
    assert_eq!(summary.files_found, 2);
    let report = GroupReporter::default().build(index);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(
        report.groups[0].members[0].path,
        report.groups[0].members[1].path
    );
}

#[test]
fn test_missing_root_among_others() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a"), b"x1").unwrap();
    fs::write(dir.path().join("b"), b"x1").unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().join("does-not-exist"), dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert!(!summary.has_warnings());
    assert_eq!(GroupReporter::default().build(index).num_dupes, 1);
}

#[test]
fn test_file_and_directory_roots_mixed() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    let single = other.path().join("single.dat");
    fs::write(&single, b"shared bytes").unwrap();
    fs::write(dir.path().join("copy.dat"), b"shared bytes").unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[single.clone(), dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 2);
    let report = GroupReporter::default().build(index);
    let paths: Vec<_> = report.groups[0].members.iter().map(|m| &m.path).collect();
    assert!(paths.contains(&&fs::canonicalize(&single).unwrap()));
}
