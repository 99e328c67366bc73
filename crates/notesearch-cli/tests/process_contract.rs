use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

fn cli_bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_notesearch"))
}

fn run_cli(vault: &Path, args: &[&str]) -> Output {
    Command::new(cli_bin_path())
        .arg("--vault")
        .arg(vault)
        .args(args)
        .env_remove("NOTESEARCH_EXCLUDED_FOLDERS")
        .env_remove("NOTESEARCH_AUTO_REINDEX")
        .output()
        .expect("run notesearch")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is json")
}

#[test]
fn index_reports_counts_as_json() {
    let vault = tempdir().expect("tempdir");
    fs::write(vault.path().join("a.md"), "# A\nbody").expect("write a");
    fs::write(vault.path().join("b.txt"), "not markdown").expect("write b");

    let report = stdout_json(&run_cli(vault.path(), &["index"]));
    assert_eq!(report["indexed"], 1);
    assert_eq!(report["skipped"], 0);
}

#[test]
fn search_summary_lists_labels() {
    let vault = tempdir().expect("tempdir");
    fs::write(vault.path().join("A.md"), "# Intro\nhello world").expect("write");

    let summaries = stdout_json(&run_cli(vault.path(), &["search", "hello", "--summary"]));
    assert_eq!(summaries[0]["path"], "A.md");
    assert_eq!(summaries[0]["shown"][0], "[content] hello world");
}

#[test]
fn complete_confirm_prints_inserted_link() {
    let vault = tempdir().expect("tempdir");
    fs::write(vault.path().join("Guide.md"), "## Setup notes\n").expect("write");

    let output = stdout_json(&run_cli(
        vault.path(),
        &["complete", "see @@# setup", "--confirm"],
    ));
    assert_eq!(output["text"], "see [[Guide#Setup notes|Setup notes]]");
}

fn stderr_payload(output: &Output) -> Value {
    assert!(!output.status.success(), "command should fail");
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .rev()
        .find_map(|line| serde_json::from_str::<Value>(line).ok())
        .expect("stderr carries a json error payload")
}

#[test]
fn unknown_setting_reports_validation_payload() {
    let vault = tempdir().expect("tempdir");
    let output = run_cli(vault.path(), &["settings", "set", "bogus", "1"]);
    let payload = stderr_payload(&output);
    assert_eq!(payload["code"], "VALIDATION_FAILED");
    assert_eq!(payload["operation"], "settings");
    assert!(payload["message"].as_str().is_some_and(|m| m.contains("bogus")));
}

#[test]
fn missing_vault_reports_not_found_payload() {
    let parent = tempdir().expect("tempdir");
    let missing = parent.path().join("nowhere");
    let output = run_cli(&missing, &["index"]);
    let payload = stderr_payload(&output);
    assert_eq!(payload["code"], "NOT_FOUND");
    assert_eq!(payload["operation"], "index");
    assert_eq!(payload["path"], missing.display().to_string());
}
