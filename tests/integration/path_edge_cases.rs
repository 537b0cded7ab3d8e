use std::fs;
use tempfile::tempdir;
use xxdupe::duplicates::DuplicateFinder;
use xxdupe::report::GroupReporter;

#[test]
fn test_paths_with_quotes() {
    // Windows does not allow double quotes in filenames.
    if cfg!(windows) {
        return;
    }
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("file_with_\"quote\".txt"), b"content").unwrap();
    fs::write(dir.path().join("duplicate.txt"), b"content").unwrap();

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();
    let report = GroupReporter::default().build(index);

    assert_eq!(report.groups.len(), 1);
    assert!(report.groups[0]
        .members
        .iter()
        .any(|f| f.path.to_string_lossy().contains('"')));
}

#[test]
fn test_unicode_file_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("café.txt"), b"unicode").unwrap();
    fs::write(dir.path().join("日本語.txt"), b"unicode").unwrap();

    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();
    let report = GroupReporter::default().build(index);

    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].members.len(), 2);
}

#[test]
fn test_hidden_files_are_scanned() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden"), b"dotfile").unwrap();
    fs::write(dir.path().join("visible"), b"dotfile").unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert_eq!(GroupReporter::default().build(index).num_dupes, 1);
}

#[cfg(unix)]
#[test]
fn test_symlinked_files_are_excluded() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("real.txt");
    fs::write(&target, b"linked content").unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 1);
    assert!(!GroupReporter::default().build(index).has_duplicates());
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    fs::write(real.join("file.txt"), b"inside").unwrap();
    std::os::unix::fs::symlink(&real, dir.path().join("alias")).unwrap();

    let (_, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(summary.files_found, 1);
}

#[cfg(unix)]
#[test]
fn test_symlink_file_root_is_skipped() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("real.txt");
    fs::write(&target, b"content").unwrap();
    let link = dir.path().join("link.txt");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let (index, summary) = DuplicateFinder::with_defaults()
        .find_duplicates(&[link])
        .unwrap();

    assert!(index.is_empty());
    assert_eq!(summary.files_found, 0);
}

#[test]
fn test_relative_file_root_is_canonicalized() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("f.bin"), b"bytes").unwrap();

    let indirect = nested.join("..").join("nested").join("f.bin");
    let (index, _) = DuplicateFinder::with_defaults()
        .find_duplicates(&[indirect])
        .unwrap();

    let groups = index.into_groups();
    assert_eq!(groups.len(), 1);
    let path = &groups[0].members[0].path;
    assert!(!path.to_string_lossy().contains(".."));
    assert_eq!(path, &fs::canonicalize(nested.join("f.bin")).unwrap());
}
