//! Basic CLI E2E tests.
//!
//! Each test runs the `moodtask` binary against its own temporary HOME so
//! config and database files never touch the real user directory.

use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command with `home` as HOME and return (stdout, stderr, code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_moodtask"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("MOODTASK_ENV")
        .env_remove("OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command, expect success and parse stdout as JSON.
fn run_json(home: &TempDir, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

fn add_task(home: &TempDir, title: &str, due: &str, extra: &[&str]) -> String {
    let mut args = vec!["task", "add", title, "--due", due];
    args.extend_from_slice(extra);
    let task = run_json(home, &args);
    task["id"].as_str().unwrap().to_string()
}

fn titles(tasks: &Value) -> Vec<String> {
    tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_mood_analyze_offline() {
    let home = TempDir::new().unwrap();
    let out = run_json(
        &home,
        &["mood", "analyze", "I'm exhausted and drained", "--offline"],
    );
    assert_eq!(out["mood"], "Tired");
    assert_eq!(out["confidence"], 0.5);
    assert_eq!(out["source"], "fallback");
}

#[test]
fn test_mood_analyze_without_api_key_falls_back() {
    let home = TempDir::new().unwrap();
    let out = run_json(&home, &["mood", "analyze", "nothing notable happens here"]);
    assert_eq!(out["mood"], "Focused");
    assert_eq!(out["confidence"], 0.1);
    assert_eq!(out["source"], "fallback");
}

#[test]
fn test_mood_history() {
    let home = TempDir::new().unwrap();
    run_json(&home, &["mood", "analyze", "so stressed", "--offline"]);
    run_json(&home, &["mood", "analyze", "feeling happy", "--offline"]);
    run_json(&home, &["mood", "analyze", "unlogged", "--offline", "--no-log"]);

    let history = run_json(&home, &["mood", "history"]);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["mood"], "Happy");
    assert_eq!(entries[1]["text_input"], "so stressed");

    let limited = run_json(&home, &["mood", "history", "--limit", "1"]);
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[test]
fn test_task_crud() {
    let home = TempDir::new().unwrap();
    let id = add_task(&home, "Write report", "2026-06-01", &["--priority", "High", "--importance", "8"]);

    let task = run_json(&home, &["task", "get", &id]);
    assert_eq!(task["title"], "Write report");
    assert_eq!(task["priority"], "High");
    assert_eq!(task["importance"], 8);
    assert_eq!(task["reorganizable"], true);

    let updated = run_json(
        &home,
        &["task", "update", &id, "--status", "In Progress", "--progress", "40"],
    );
    assert_eq!(updated["status"], "In Progress");
    assert_eq!(updated["progress"], 40);

    let (_, _, code) = run_cli(&home, &["task", "delete", &id]);
    assert_eq!(code, 0);

    let (_, stderr, code) = run_cli(&home, &["task", "get", &id]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: task not found"));
}

#[test]
fn test_task_add_rejects_out_of_range_importance() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(
        &home,
        &["task", "add", "Bad", "--due", "2026-06-01", "--importance", "11"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("importance"));
}

#[test]
fn test_task_reorganize_tired() {
    let home = TempDir::new().unwrap();
    add_task(&home, "High", "2026-06-01", &["--priority", "High"]);
    add_task(&home, "Pinned", "2026-06-01", &["--priority", "Low", "--fixed"]);
    add_task(&home, "Medium", "2026-06-01", &["--priority", "Medium"]);
    add_task(&home, "Low", "2026-06-01", &["--priority", "Low"]);

    let preview = run_json(&home, &["task", "reorganize", "--mood", "tired", "--dry-run"]);
    assert_eq!(titles(&preview), ["Low", "Pinned", "Medium", "High"]);
    let stored = run_json(&home, &["task", "list"]);
    assert_eq!(titles(&stored), ["High", "Pinned", "Medium", "Low"]);

    run_json(&home, &["task", "reorganize", "--mood", "Tired"]);
    let stored = run_json(&home, &["task", "list"]);
    assert_eq!(titles(&stored), ["Low", "Pinned", "Medium", "High"]);
}

#[test]
fn test_dry_run_logs_skipped_persist() {
    let home = TempDir::new().unwrap();
    add_task(&home, "Only", "2026-06-01", &[]);

    let output = Command::new(env!("CARGO_BIN_EXE_moodtask"))
        .args(["task", "reorganize", "--mood", "Happy", "--dry-run"])
        .env("HOME", home.path())
        .env_remove("MOODTASK_ENV")
        .env("RUST_LOG", "moodtask=debug")
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not persisting task order"), "stderr: {stderr}");

    // Default filter stays quiet.
    let (_, stderr, code) = run_cli(&home, &["task", "reorganize", "--mood", "Happy", "--dry-run"]);
    assert_eq!(code, 0);
    assert!(stderr.is_empty(), "stderr: {stderr}");
}

#[test]
fn test_task_reorganize_unknown_mood() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&home, &["task", "reorganize", "--mood", "Bored"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Bored"));
}

#[test]
fn test_plan() {
    let home = TempDir::new().unwrap();
    add_task(&home, "Later", "2026-06-10", &[]);
    add_task(&home, "Sooner", "2026-06-02", &[]);

    let out = run_json(
        &home,
        &["plan", "so much pressure, I'm overwhelmed", "--offline"],
    );
    assert_eq!(out["assessment"]["mood"], "Stressed");
    assert_eq!(titles(&out["tasks"]), ["Sooner", "Later"]);

    let stored = run_json(&home, &["task", "list"]);
    assert_eq!(titles(&stored), ["Sooner", "Later"]);

    let history = run_json(&home, &["mood", "history"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn test_config_roundtrip() {
    let home = TempDir::new().unwrap();

    let (stdout, _, code) = run_cli(&home, &["config", "get", "classifier.model"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "gpt-3.5-turbo");

    let (_, _, code) = run_cli(&home, &["config", "set", "reorganize.pin_strict", "true"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&home, &["config", "get", "reorganize.pin_strict"]);
    assert_eq!(stdout.trim(), "true");

    let (_, stderr, code) = run_cli(&home, &["config", "set", "no.such.key", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, _, code) = run_cli(&home, &["config", "reset"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&home, &["config", "get", "reorganize.pin_strict"]);
    assert_eq!(stdout.trim(), "false");
}
