//! End-to-end CLI tests.
//!
//! Each test gets an isolated store via `LAB_STORE` pointing into a
//! temp directory. `LAB_SYNC_DELAY_MS=0` makes the simulated sync
//! instant, and stdout is a pipe, so every command emits JSON.

use assert_cmd::Command;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> PathBuf {
    dir.path().join("runs.json")
}

fn lab(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lab").unwrap();
    cmd.env_remove("LAB_TEST_STORE")
        .env_remove("LAB_NET")
        .env_remove("LAB_SYNC_FAIL")
        .env_remove("RUST_LOG")
        .env("LAB_STORE", store)
        .env("LAB_SYNC_DELAY_MS", "0");
    cmd
}

fn parse_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn read_store(store: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(store).unwrap()).unwrap()
}

fn init(store: &Path) {
    lab(store).arg("init").assert().success();
}

fn create_run(store: &Path, name: &str) -> String {
    let assert = lab(store)
        .args(["run", "create", name])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    out["run"]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_init_creates_store_and_rejects_reinit() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    lab(&store).arg("init").assert().success();
    assert!(store.exists());
    assert!(dir.path().join("connectivity.json").exists());

    lab(&store).arg("init").assert().code(2);
    lab(&store).args(["init", "--force"]).assert().success();
}

#[test]
fn test_commands_require_init() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let assert = lab(&store).args(["run", "list"]).assert().code(2);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("NOT_INITIALIZED"));
}

#[test]
fn test_online_create_syncs_immediately() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    let assert = lab(&store)
        .args(["run", "create", "Titration 42", "--sample", "SMP-7"])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());

    assert_eq!(out["run"]["name"], "Titration 42");
    assert_eq!(out["run"]["sampleId"], "SMP-7");
    assert_eq!(out["run"]["pendingSync"], false);
    assert_eq!(out["sync"]["status"], "up_to_date");
    assert_eq!(out["sync"]["pendingCount"], 0);
}

#[test]
fn test_offline_mutations_queue_and_reconnect_syncs() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    lab(&store).args(["net", "offline"]).assert().success();

    let assert = lab(&store)
        .args(["run", "create", "Assay A"])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["run"]["pendingSync"], true);
    assert_eq!(out["sync"]["status"], "pending");
    assert_eq!(out["sync"]["pendingCount"], 1);
    assert_eq!(out["sync"]["retryAvailable"], true);

    // The pending flag is persisted, not just in memory.
    assert_eq!(read_store(&store)[0]["pendingSync"], true);

    let assert = lab(&store).args(["net", "online"]).assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["sync"]["status"], "up_to_date");
    assert_eq!(out["sync"]["pendingCount"], 0);

    assert_eq!(read_store(&store)[0]["pendingSync"], false);
}

#[test]
fn test_sync_failure_preserves_pending_and_retry_recovers() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    lab(&store).args(["net", "offline"]).assert().success();
    lab(&store)
        .args(["run", "create", "Assay A"])
        .assert()
        .success();

    // Reconnect with the remote rigged to fail. The command still exits
    // zero (the record is safe locally) but the report shows the error.
    let assert = lab(&store)
        .args(["net", "online"])
        .env("LAB_SYNC_FAIL", "1")
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["sync"]["status"], "error");
    assert_eq!(out["sync"]["pendingCount"], 1);
    assert_eq!(out["sync"]["retryAvailable"], true);
    assert_eq!(read_store(&store)[0]["pendingSync"], true);

    // An explicit sync propagates the failure as an exit code.
    let assert = lab(&store)
        .args(["sync", "now"])
        .env("LAB_SYNC_FAIL", "backend unreachable")
        .assert()
        .code(6);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("SYNC_ERROR"));
    assert!(stderr.contains("backend unreachable"));
    assert_eq!(read_store(&store)[0]["pendingSync"], true);

    // Nothing was dropped; a clean retry drains the queue.
    let assert = lab(&store).args(["sync", "now"]).assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["synced"], 1);
    assert_eq!(out["sync"]["status"], "up_to_date");
    assert_eq!(read_store(&store)[0]["pendingSync"], false);
}

#[test]
fn test_sync_now_offline_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    lab(&store).args(["net", "offline"]).assert().success();
    lab(&store)
        .args(["run", "create", "Queued"])
        .assert()
        .success();

    let assert = lab(&store).args(["sync", "now"]).assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["scheduled"], false);
    assert_eq!(out["sync"]["online"], false);
    assert_eq!(out["sync"]["status"], "pending");
}

#[test]
fn test_sync_status_lists_pending_runs_and_store() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    lab(&store).args(["net", "offline"]).assert().success();
    let id = create_run(&store, "Queued");

    let assert = lab(&store).args(["sync", "status"]).assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["sync"]["status"], "pending");
    assert_eq!(out["pendingRuns"], serde_json::json!([id]));
    assert_eq!(out["store"]["path"], store.to_string_lossy().as_ref());
    assert!(out["store"]["sizeBytes"].as_u64().unwrap() > 0);
}

#[test]
fn test_empty_name_is_rejected_and_nothing_created() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    let assert = lab(&store).args(["run", "create", "   "]).assert().code(4);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("REQUIRED_FIELD"));

    let assert = lab(&store).args(["run", "list"]).assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["count"], 0);
}

#[test]
fn test_unknown_run_id_exits_not_found() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    let assert = lab(&store)
        .args(["run", "show", "run_nope"])
        .assert()
        .code(3);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("RUN_NOT_FOUND"));
}

#[test]
fn test_update_requires_at_least_one_field() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);
    let id = create_run(&store, "Assay A");

    let assert = lab(&store).args(["run", "update", &id]).assert().code(4);
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("INVALID_ARGUMENT"));
}

#[test]
fn test_update_applies_patch_and_accepts_synonyms() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);
    let id = create_run(&store, "Assay A");

    let assert = lab(&store)
        .args(["run", "update", &id, "--name", "Renamed", "--status", "done"])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["run"]["name"], "Renamed");
    assert_eq!(out["run"]["status"], "complete");
}

#[test]
fn test_list_filters_by_status_and_complete_marks_runs() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);
    let first = create_run(&store, "First");
    create_run(&store, "Second");

    lab(&store)
        .args(["run", "complete", &first])
        .assert()
        .success();

    let assert = lab(&store)
        .args(["run", "list", "--status", "complete"])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["count"], 1);
    assert_eq!(out["runs"][0]["id"], first.as_str());
    assert_eq!(out["runs"][0]["status"], "complete");

    let assert = lab(&store)
        .args(["run", "list", "--pending"])
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["count"], 0);
}

#[test]
fn test_status_reports_store_overview() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);
    create_run(&store, "Assay A");

    let assert = lab(&store).arg("status").assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["runs"]["total"], 1);
    assert_eq!(out["runs"]["inProgress"], 1);
    assert_eq!(out["sync"]["online"], true);
    assert_eq!(out["sync"]["status"], "up_to_date");
}

#[test]
fn test_net_env_override_wins_over_stored_toggle() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    init(&store);

    let assert = lab(&store)
        .args(["run", "create", "Queued"])
        .env("LAB_NET", "offline")
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["run"]["pendingSync"], true);

    let assert = lab(&store)
        .args(["net", "status"])
        .env("LAB_NET", "offline")
        .assert()
        .success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["online"], false);
    assert_eq!(out["stored"], true);
}

#[test]
fn test_version_reports_package_version() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    let assert = lab(&store).arg("version").assert().success();
    let out = parse_stdout(assert.get_output());
    assert_eq!(out["version"], env!("CARGO_PKG_VERSION"));
}
