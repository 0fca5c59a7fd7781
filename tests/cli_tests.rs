// SPDX-License-Identifier: PMPL-1.0-or-later

//! Command-line surface tests for the gettext-json binary

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_gettext-json"));
    // Keep the host locale out of the fallback path.
    for var in ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG", "RUST_LOG"] {
        command.env_remove(var);
    }
    command
}

fn locale_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let messages = dir.path().join("fr/LC_MESSAGES");
    fs::create_dir_all(&messages).unwrap();
    fs::copy(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/messages-le.mo"),
        messages.join("messages.mo"),
    )
    .unwrap();
    dir
}

#[test]
fn export_prints_document_to_stdout() {
    let tree = locale_tree();
    let output = bin()
        .args(["export", "messages"])
        .arg(tree.path())
        .args(["--lang", "fr"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"{"":{"project_id_version":"demo 1.0""#));
    assert!(stdout.ends_with("}\n"));
}

#[test]
fn export_honours_language_env_fallback() {
    let tree = locale_tree();
    let output = bin()
        .args(["export", "messages"])
        .arg(tree.path())
        .env("LANG", "fr_FR.UTF-8")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn export_writes_yaml_file_by_extension() {
    let tree = locale_tree();
    let target = tree.path().join("fr.yaml");
    let status = bin()
        .args(["export", "messages"])
        .arg(tree.path())
        .args(["-l", "de", "-l", "fr", "-o"])
        .arg(&target)
        .status()
        .unwrap();
    assert!(status.success());
    let written = fs::read_to_string(&target).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&written).unwrap();
    assert_eq!(value["apple"][1], serde_yaml::Value::from("pomme"));
}

#[test]
fn missing_catalog_fails_without_output() {
    let tree = locale_tree();
    let output = bin()
        .args(["export", "messages"])
        .arg(tree.path())
        .args(["--lang", "ja"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("no catalog for domain `messages`"));
}

#[test]
fn missing_positionals_is_usage_error() {
    let output = bin().args(["export", "messages"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn top_level_help_points_at_export_positionals() {
    let output = bin().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8(output.stdout).unwrap();
    assert!(help.contains("gettext-json export messages ./locale"), "{}", help);
}

#[test]
fn bare_positionals_are_usage_error() {
    let output = bin().args(["messages", "locale"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn preprocess_reads_stdin() {
    let mut child = bin()
        .arg("preprocess")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"  // note\n_(\"a\" +\n  \"b\");\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "  # note\n_(\"ab\");\n");
}
