//! Integration tests for `wake classify` via the CLI.
//!
//! These verify the layered resolution end to end: keyword rules, stored
//! overrides beating the rules, persistence across runs, and the
//! classified prompt table.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_classify_applies_keyword_rules() {
    let env = TestEnv::new();
    env.write_log("Запусти ci pipeline и phpstan\n---\nисправь ошибку\n---\nзагадка");

    env.wake()
        .arg("classify")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"ci\""))
        .stdout(predicate::str::contains("\"type\":\"fix\""))
        .stdout(predicate::str::contains("\"unresolved\":1"));
}

#[test]
fn test_classify_persists_decisions() {
    let env = TestEnv::new();
    env.write_log("исправь ошибку");

    env.wake().arg("classify").assert().success();

    let store = fs::read_to_string(env.path().join(".wake/classifications.jsonl")).unwrap();
    assert!(store.contains("{\"text\":\"исправь ошибку\",\"type\":\"fix\"}"));
}

#[test]
fn test_classify_override_beats_rules() {
    let env = TestEnv::new();
    // "добавь" would match the feat rule, the stored override wins
    env.write_log("добавь новую фичу");
    env.write_file(
        ".wake/classifications.jsonl",
        "{\"text\":\"добавь новую фичу\",\"type\":\"fix\"}\n",
    );

    env.wake()
        .arg("classify")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"fix\""))
        .stdout(predicate::str::contains("\"type\":\"feat\"").not());
}

#[test]
fn test_classify_is_idempotent_across_runs() {
    let env = TestEnv::new();
    env.write_log("исправь ошибку\n---\nзагадка");

    let first = env.wake().arg("classify").output().unwrap();
    let second = env.wake().arg("classify").output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_classify_keeps_overrides_for_unseen_prompts() {
    let env = TestEnv::new();
    env.write_log("исправь ошибку");
    env.write_file(
        ".wake/classifications.jsonl",
        "{\"text\":\"промпт из прошлого\",\"type\":\"refactor\"}\n",
    );

    env.wake().arg("classify").assert().success();

    let store = fs::read_to_string(env.path().join(".wake/classifications.jsonl")).unwrap();
    assert!(store.contains("промпт из прошлого"));
    assert!(store.contains("исправь ошибку"));
}

#[test]
fn test_classify_corrupt_store_is_nonfatal() {
    let env = TestEnv::new();
    env.write_log("исправь ошибку");
    env.write_file(".wake/classifications.jsonl", "{{{ not json\n");

    env.wake()
        .arg("classify")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\":\"fix\""));
}

#[test]
fn test_classify_writes_classified_table() {
    let env = TestEnv::new();
    env.write_log("сделай коммит\n---\nобнови readme");

    env.wake().arg("classify").assert().success();

    let table = fs::read_to_string(env.path().join("analysis/prompts.csv")).unwrap();
    assert!(table.contains("сделай коммит,2,13,git"));
    assert!(table.contains("обнови readme,2,13,docs"));
}

#[test]
fn test_classify_human_distribution() {
    let env = TestEnv::new();
    env.write_log("исправь ошибку\n---\nфикс бага");

    env.wake()
        .args(["classify", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classified 2 prompts"))
        .stdout(predicate::str::contains("fix"))
        .stdout(predicate::str::contains("Unresolved (other): 0"));
}
