use clap::Parser;
use filetime::{set_file_mtime, FileTime};
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;
use xxdupe::cli::Cli;
use xxdupe::error::ExitCode;
use xxdupe::output::format_time;
use xxdupe::run_app_with_writer;
use xxdupe::scanner::fingerprint_bytes;

/// Run against an empty config file so a user's own config.toml cannot
/// change the output.
fn run(args: &[&str]) -> (anyhow::Result<ExitCode>, String) {
    let _guard = crate::ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let config_dir = tempdir().unwrap();
    let config = config_dir.path().join("config.toml");
    fs::write(&config, "").unwrap();

    let mut argv = vec!["xxdupe", "--no-progress", "-q", "--config"];
    argv.push(config.to_str().unwrap());
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut out = Vec::new();
    let result = run_app_with_writer(cli, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn hello_world_tree(dir: &Path) {
    let a = dir.join("a.txt");
    let b = dir.join("b.txt");
    fs::write(&a, b"hello").unwrap();
    fs::write(&b, b"hello").unwrap();
    fs::write(dir.join("c.txt"), b"world").unwrap();
    set_file_mtime(&a, FileTime::from_unix_time(1_600_000_000, 0)).unwrap();
    set_file_mtime(&b, FileTime::from_unix_time(1_600_000_100, 0)).unwrap();
}

#[test]
fn test_text_report_layout() {
    let dir = tempdir().unwrap();
    hello_world_tree(dir.path());
    let root = dir.path().to_str().unwrap();

    let (result, out) = run(&["-t", root]);
    assert_eq!(result.unwrap(), ExitCode::Success);

    let expected = format!(
        "Hash {} - (5 B)\n-------------------------\n\"{}\"\n\"{}\"\n\n  * 1 duplicate files (5 B).\n",
        fingerprint_bytes(b"hello"),
        dir.path().join("b.txt").display(),
        dir.path().join("a.txt").display(),
    );
    assert_eq!(out, expected);
}

#[test]
fn test_text_report_with_times() {
    let dir = tempdir().unwrap();
    hello_world_tree(dir.path());

    let (result, out) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(result.unwrap(), ExitCode::Success);

    let newest = format!(
        "{}:\"{}\"",
        format_time(SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_100)),
        dir.path().join("b.txt").display()
    );
    assert_eq!(out.lines().nth(2), Some(newest.as_str()));
}

#[test]
fn test_hide_recent_and_hash() {
    let dir = tempdir().unwrap();
    hello_world_tree(dir.path());

    let (result, out) = run(&["-r", "-H", "-t", dir.path().to_str().unwrap()]);
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert_eq!(
        out,
        format!(
            "\"{}\"\n\n  * 1 duplicate files (5 B).\n",
            dir.path().join("a.txt").display()
        )
    );
}

#[test]
fn test_empty_directory_prints_notice() {
    let dir = tempdir().unwrap();
    let (result, out) = run(&[dir.path().to_str().unwrap()]);

    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert_eq!(out, "No duplicated files found.\n");
}

#[test]
fn test_only_unique_files_prints_zero_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x"), b"one").unwrap();
    fs::write(dir.path().join("y"), b"two!").unwrap();

    let (result, out) = run(&[dir.path().to_str().unwrap()]);
    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert_eq!(out, "  * 0 duplicate files (0 B).\n");
}

#[test]
fn test_json_report() {
    let dir = tempdir().unwrap();
    hello_world_tree(dir.path());

    let (result, out) = run(&["--output", "json", dir.path().to_str().unwrap()]);
    assert_eq!(result.unwrap(), ExitCode::Success);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["summary"]["files_found"], 3);
    assert_eq!(value["summary"]["num_dupes"], 1);
    assert_eq!(value["summary"]["exit_code_name"], "XD000");
    let group = &value["duplicates"][0];
    assert_eq!(group["hash"], fingerprint_bytes(b"hello").to_hex());
    assert_eq!(group["files"].as_array().unwrap().len(), 2);
    assert!(group["files"][0]["path"].as_str().unwrap().ends_with("b.txt"));
}

#[test]
fn test_missing_root_is_silent() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let (result, out) = run(&[missing.to_str().unwrap()]);
    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert_eq!(out, "No duplicated files found.\n");
}
