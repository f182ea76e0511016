//! Integration tests for mshar-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn mshar_cmd() -> Command {
    cargo_bin_cmd!("mshar")
}

/// Writes two input files and returns their paths.
fn write_inputs(dir: &Path) -> Vec<PathBuf> {
    let a = dir.join("a.txt");
    let b = dir.join("sub").join("b.bin");
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(&a, "hello\n").unwrap();
    fs::write(&b, [0u8, 1, 2, 255, 254, 10, 13]).unwrap();
    vec![a, b]
}

/// Runs `mshar create` with the inputs below `src` and returns the archive text.
fn create_archive(src: &Path, extra: &[&str]) -> String {
    let files = write_inputs(src);
    let output = mshar_cmd()
        .arg("create")
        .arg("--strip-prefix")
        .arg(src)
        .args(extra)
        .args(&files)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("archive must be text")
}

#[test]
fn test_version_flag() {
    mshar_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mshar"));
}

#[test]
fn test_help_lists_subcommands() {
    mshar_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_create_writes_archive_to_stdout() {
    let src = TempDir::new().expect("failed to create temp dir");
    let text = create_archive(src.path(), &[]);

    assert!(text.starts_with("#!/bin/sh\n"));
    assert!(text.contains("MSHAR_NAME='a.txt'"));
    assert!(text.contains("MSHAR_NAME='sub/b.bin'"));
    assert!(text.find("'a.txt'").unwrap() < text.find("'sub/b.bin'").unwrap());
}

#[test]
fn test_create_with_scripts() {
    let src = TempDir::new().expect("failed to create temp dir");
    let pre = src.path().join("pre.sh");
    let post = src.path().join("post.sh");
    fs::write(&pre, "echo unpacking\n").unwrap();
    fs::write(&post, "echo done\n").unwrap();

    let text = create_archive(
        src.path(),
        &["--pre", pre.to_str().unwrap(), "--post", post.to_str().unwrap()],
    );
    assert!(text.starts_with("echo unpacking\n#!/bin/sh\n"));
    assert!(text.ends_with("echo done\n"));
}

#[test]
fn test_create_dash_means_no_script() {
    let src = TempDir::new().expect("failed to create temp dir");
    let text = create_archive(src.path(), &["--pre", "-", "--post", "-"]);
    assert!(text.starts_with("#!/bin/sh\n"));
}

#[test]
fn test_create_without_files_is_scripts_only() {
    let src = TempDir::new().expect("failed to create temp dir");
    let pre = src.path().join("pre.sh");
    fs::write(&pre, "echo only\n").unwrap();

    mshar_cmd()
        .arg("create")
        .arg("--pre")
        .arg(&pre)
        .assert()
        .success()
        .stdout("echo only\n");

    mshar_cmd()
        .arg("create")
        .arg("--reject-empty")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files to archive"));
}

#[test]
fn test_create_skips_missing_file_with_warning() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());

    mshar_cmd()
        .arg("create")
        .arg(&files[0])
        .arg(src.path().join("missing.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stderr(predicate::str::contains("missing.txt"));
}

#[test]
fn test_create_strict_fails_on_missing_file() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());

    mshar_cmd()
        .arg("create")
        .arg("--strict")
        .arg(&files[0])
        .arg(src.path().join("missing.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_create_lenient_is_silent() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());

    mshar_cmd()
        .arg("create")
        .arg("--lenient")
        .arg(&files[0])
        .arg(src.path().join("missing.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("missing.txt").not());
}

#[test]
fn test_create_output_file_and_force() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());
    let out = src.path().join("bundle.shar");

    mshar_cmd()
        .arg("create")
        .arg("-o")
        .arg(&out)
        .args(&files)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));
    assert!(fs::read_to_string(&out).unwrap().contains("MSHAR_EOF"));

    mshar_cmd()
        .arg("create")
        .arg("-o")
        .arg(&out)
        .args(&files)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    mshar_cmd()
        .arg("create")
        .arg("-f")
        .arg("-o")
        .arg(&out)
        .args(&files)
        .assert()
        .success();
}

#[test]
fn test_create_json_report() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());
    let out = src.path().join("bundle.shar");

    let output = mshar_cmd()
        .arg("create")
        .arg("--json")
        .arg("--compress")
        .arg("gzip")
        .arg("-o")
        .arg(&out)
        .args(&files)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "create");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["compressed_members"], 2);
}

#[test]
fn test_list_archive() {
    let src = TempDir::new().expect("failed to create temp dir");
    let archive = src.path().join("bundle.shar");
    fs::write(&archive, create_archive(src.path(), &[])).unwrap();

    mshar_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout("a.txt\nsub/b.bin\n");

    mshar_cmd()
        .arg("list")
        .arg("-l")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total: 2 files, 13 B"));
}

#[test]
fn test_list_json() {
    let src = TempDir::new().expect("failed to create temp dir");
    let archive = src.path().join("bundle.shar");
    fs::write(&archive, create_archive(src.path(), &["--compress", "auto"])).unwrap();

    let output = mshar_cmd()
        .arg("list")
        .arg("--json")
        .arg(&archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["data"]["total_entries"], 2);
    assert_eq!(json["data"]["entries"][1]["name"], "sub/b.bin");
    assert_eq!(json["data"]["entries"][1]["size"], 7);
}

#[test]
fn test_extract_round_trip() {
    let src = TempDir::new().expect("failed to create temp dir");
    let archive = src.path().join("bundle.shar");
    fs::write(&archive, create_archive(src.path(), &["--compress", "auto"])).unwrap();

    let dest = TempDir::new().expect("failed to create temp dir");
    mshar_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(dest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Files written:    2"));

    assert_eq!(fs::read(dest.path().join("a.txt")).unwrap(), b"hello\n");
    assert_eq!(
        fs::read(dest.path().join("sub/b.bin")).unwrap(),
        [0u8, 1, 2, 255, 254, 10, 13]
    );

    mshar_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(dest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    mshar_cmd()
        .arg("extract")
        .arg("--force")
        .arg(&archive)
        .arg(dest.path())
        .assert()
        .success();
}

#[test]
fn test_extract_rejects_absolute_names() {
    let src = TempDir::new().expect("failed to create temp dir");
    let files = write_inputs(src.path());
    let archive = src.path().join("abs.shar");

    mshar_cmd()
        .arg("create")
        .arg("-o")
        .arg(&archive)
        .arg(&files[0])
        .assert()
        .success();

    let dest = TempDir::new().expect("failed to create temp dir");
    mshar_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(dest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Security violation"));
}

#[test]
fn test_extract_malformed_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("broken.shar");
    let src = TempDir::new().expect("failed to create temp dir");
    let text = create_archive(src.path(), &[]);
    let cut = &text[..text.find("MSHAR_EOF\n").unwrap()];
    fs::write(&archive, cut).unwrap();

    mshar_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid archive"));
}

#[test]
fn test_extract_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    mshar_cmd()
        .arg("extract")
        .arg("nonexistent.shar")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ERROR:"));
}

#[test]
fn test_completion_bash() {
    mshar_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("mshar"));
}
