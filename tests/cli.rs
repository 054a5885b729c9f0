//! Binary smoke tests: each subcommand run as a process.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cv-builder"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn fixture_seed() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/seed.json")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn sample_prints_parseable_json() {
    let tmp = TempDir::new().unwrap();
    let out = stdout(&bin().current_dir(tmp.path()).arg("sample").output().unwrap());
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["personalInfo"]["fullName"], "Jane Doe");
    assert_eq!(value["sections"][0]["type"], "text");
}

#[test]
fn gen_config_round_trips_as_config() {
    let tmp = TempDir::new().unwrap();
    let out = stdout(&bin().arg("gen-config").output().unwrap());
    let path = tmp.path().join("cv.toml");
    std::fs::write(&path, &out).unwrap();

    let config = cv_builder::config::load_config(&path).unwrap();
    assert_eq!(config.export.output, "resume.html");
}

#[test]
fn preview_renders_seed_to_file() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("page.html");
    let out = stdout(
        &bin()
            .current_dir(tmp.path())
            .arg("--seed")
            .arg(fixture_seed())
            .arg("preview")
            .arg("--output")
            .arg(&target)
            .output()
            .unwrap(),
    );
    assert!(out.contains("Printed preview →"));

    let html = std::fs::read_to_string(&target).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>Sam Rivera</h1>"));
}

#[test]
fn preview_honours_config_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("cv.toml"), "[preview]\nshow_icons = false\n").unwrap();
    let out = stdout(&bin().current_dir(tmp.path()).arg("preview").output().unwrap());
    assert!(out.contains("<h1>Jane Doe</h1>"));
    assert!(!out.contains("fa-envelope"));
}

#[test]
fn invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("cv.toml"), "[preview]\nbogus = 1\n").unwrap();
    let output = bin().current_dir(tmp.path()).arg("preview").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn edit_session_prints_to_configured_output() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("cv.toml"), "[export]\noutput = \"out/cv.html\"\n").unwrap();

    let mut child = bin()
        .current_dir(tmp.path())
        .arg("edit")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"set fullName \"Ada Lovelace\"\nprint\nquit\n")
        .unwrap();
    let out = stdout(&child.wait_with_output().unwrap());
    assert!(out.contains("Printed preview →"));

    let html = std::fs::read_to_string(tmp.path().join("out/cv.html")).unwrap();
    assert!(html.contains("<h1>Ada Lovelace</h1>"));
}
