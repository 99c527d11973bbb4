//! CLI tests for the offline commands
//!
//! `create` needs a live responder, so these cover help, list, and show.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_config(dir: &TempDir) -> std::path::PathBuf {
    let config_path = dir.path().join("learnhub.yml");
    let data_dir = dir.path().join("plans");
    std::fs::write(
        &config_path,
        format!("storage:\n  data-dir: {}\n", data_dir.display()),
    )
    .expect("write config");
    config_path
}

fn lh() -> Command {
    Command::cargo_bin("lh").expect("binary exists")
}

#[test]
fn test_help_lists_commands() {
    lh().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_list_empty_store() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    lh().args(["-c", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_show_missing_plan_fails() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    lh().args(["-c", config.to_str().unwrap(), "show", "missing-plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing-plan"));
}

#[test]
fn test_show_saved_plan_renders_markdown() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir);

    let plans_dir = dir.path().join("plans");
    std::fs::create_dir_all(&plans_dir).unwrap();
    std::fs::write(
        plans_dir.join("test-plan.json"),
        r#"{
            "id": "test-plan",
            "goal": "learn rust",
            "subject": {
                "id": "s1",
                "subject": "Rust",
                "description": "the language",
                "reason": "memory safety",
                "subjects": [],
                "resources": [{"title": "The Book", "description": "official guide"}],
                "exercises": []
            }
        }"#,
    )
    .unwrap();

    lh().args(["-c", config.to_str().unwrap(), "show", "test-plan"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Learning Hub: Rust"))
        .stdout(predicate::str::contains("* The Book: official guide"));

    lh().args(["-c", config.to_str().unwrap(), "show", "test-plan", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"goal\": \"learn rust\""));

    lh().args(["-c", config.to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test-plan"))
        .stdout(predicate::str::contains("learn rust"));
}
