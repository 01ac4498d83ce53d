//! Integration tests for `wake prompts` via the CLI.
//!
//! These verify segmentation end to end: delimiter handling, noise
//! filtering, length metrics, the exported prompt table, and graceful
//! degradation when the log is missing.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_prompts_segments_log() {
    let env = TestEnv::new();
    env.write_log("Добавь новую фичу\n---\ncommit abc123\n---\n   \n---\nИсправь ошибку в тесте");

    env.wake()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_prompts\":2"));
}

#[test]
fn test_prompts_human_readable() {
    let env = TestEnv::new();
    env.write_log("первый промпт\n---\nвторой промпт");

    env.wake()
        .args(["prompts", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prompts: 2"))
        .stdout(predicate::str::contains("Average words per prompt: 2.0"));
}

#[test]
fn test_prompts_drops_bracketed_tags() {
    let env = TestEnv::new();
    env.write_log("[cursor] session metadata\n---\nнастоящий промпт");

    env.wake()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_prompts\":1"));
}

#[test]
fn test_prompts_missing_log_is_nonfatal() {
    let env = TestEnv::new();

    env.wake()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_prompts\":0"))
        .stderr(predicate::str::contains("Warning"));
}

#[test]
fn test_prompts_writes_table() {
    let env = TestEnv::new();
    env.write_log("раз два три\n---\nчетыре");

    env.wake().arg("prompts").assert().success();

    let table = fs::read_to_string(env.path().join("analysis/prompts.csv")).unwrap();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "text,word_count,char_count,type");
    assert_eq!(lines[1], "раз два три,3,11,");
    assert_eq!(lines[2], "четыре,1,6,");
}

#[test]
fn test_prompts_explicit_log_flag() {
    let env = TestEnv::new();
    env.write_file("elsewhere.md", "единственный промпт");

    env.wake()
        .args(["prompts", "--log", "elsewhere.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_prompts\":1"));
}

#[test]
fn test_prompts_config_file_log_path() {
    let env = TestEnv::new();
    env.write_file("wake.toml", "prompt-log = \"notes.md\"\n");
    env.write_file("notes.md", "из конфига");

    env.wake()
        .arg("prompts")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_prompts\":1"));
}

#[test]
fn test_prompts_malformed_config_is_error() {
    let env = TestEnv::new();
    env.write_file("wake.toml", "tracked-extensions = 3\n");

    env.wake()
        .arg("prompts")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
