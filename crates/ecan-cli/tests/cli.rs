//! CLI command integration tests.
//! Each test uses a temp directory via ECAN_DATA_DIR for full isolation.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ecan_cmd(data_dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("ecan").unwrap();
    cmd.env("ECAN_DATA_DIR", data_dir.path());
    cmd
}

const GRAPH_JSON: &str = r#"{
    "nodes": {
        "alpha": {
            "id": "alpha", "type": "concept",
            "attributes": {"activation": 0.9, "attention": 0.8, "activationCount": 50,
                           "lastActivationMs": 99999999999999, "systemCritical": true}
        },
        "beta": {
            "id": "beta", "type": "relation",
            "attributes": {"activation": 0.2}
        }
    },
    "edges": {
        "e1": {"id": "e1", "endpoints": ["alpha", "beta"], "type": "related", "weight": 1.0}
    }
}"#;

const TASKS_JSON: &str = r#"{
    "available": {"cpu": 1000, "memory": 1000, "bandwidth": 1000, "storage": 1000},
    "tasks": [
        {"id": "low", "nodeId": "beta", "priority": 20,
         "resources": {"cpu": 10, "memory": 10, "bandwidth": 10, "storage": 10}},
        {"id": "top", "nodeId": "alpha", "priority": 90,
         "resources": {"cpu": 500, "memory": 400, "bandwidth": 300, "storage": 200}},
        {"id": "giant", "nodeId": "alpha", "priority": 95,
         "resources": {"cpu": 99999, "memory": 1, "bandwidth": 1, "storage": 1}}
    ]
}"#;

#[test]
fn stats_fresh_ledger() {
    let dir = TempDir::new().unwrap();
    ecan_cmd(&dir)
        .args(["stats", "--state", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries:  0"));
}

#[test]
fn stimulate_then_stats() {
    let dir = TempDir::new().unwrap();
    let graph = dir.path().join("graph.json");
    std::fs::write(&graph, GRAPH_JSON).unwrap();

    ecan_cmd(&dir)
        .args(["stimulate", "--state", "stim"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("stimulated 2 nodes"));

    ecan_cmd(&dir)
        .args(["stats", "--state", "stim"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries:  2"))
        .stdout(predicate::str::contains("alpha"));
}

#[test]
fn cycle_reports_each_pass() {
    let dir = TempDir::new().unwrap();
    let graph = dir.path().join("graph.json");
    std::fs::write(&graph, GRAPH_JSON).unwrap();

    ecan_cmd(&dir)
        .args(["stimulate", "--state", "cyc"])
        .arg(&graph)
        .assert()
        .success();

    ecan_cmd(&dir)
        .args(["cycle", "--state", "cyc", "--count", "3"])
        .arg(&graph)
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle 1:"))
        .stdout(predicate::str::contains("cycle 3:"))
        .stdout(predicate::str::contains("bank="));
}

#[test]
fn schedule_admits_by_priority() {
    let dir = TempDir::new().unwrap();
    let tasks = dir.path().join("tasks.json");
    std::fs::write(&tasks, TASKS_JSON).unwrap();

    let output = ecan_cmd(&dir)
        .arg("schedule")
        .arg(&tasks)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    // The giant is skipped; the 90 leads, the 20 still fits behind it
    assert!(!stdout.contains("admit giant"), "giant must be skipped:\n{stdout}");
    let top_pos = stdout.find("admit top").expect("top should be admitted");
    let low_pos = stdout.find("admit low").expect("low should be admitted");
    assert!(top_pos < low_pos, "priority 90 must come first:\n{stdout}");
    assert!(
        stdout.contains("admitted 2/3 tasks"),
        "unexpected summary:\n{stdout}"
    );
    // 1440 admitted units over 4000 available
    assert!(stdout.contains("utilization 36.0%"), "{stdout}");
}

#[test]
fn export_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let graph = dir.path().join("graph.json");
    std::fs::write(&graph, GRAPH_JSON).unwrap();
    let snapshot = dir.path().join("snapshot.json");

    ecan_cmd(&dir)
        .args(["stimulate", "--state", "src"])
        .arg(&graph)
        .assert()
        .success();

    ecan_cmd(&dir)
        .args(["export", "--state", "src"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("exported 2 entries"));

    ecan_cmd(&dir)
        .args(["import", "--state", "copy"])
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported 2 entries"));

    ecan_cmd(&dir)
        .args(["stats", "--state", "copy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("entries:  2"));
}

#[test]
fn malformed_graph_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let graph = dir.path().join("bad.json");
    std::fs::write(&graph, "{nonsense").unwrap();

    ecan_cmd(&dir)
        .args(["cycle", "--state", "bad"])
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse graph"));
}

#[test]
fn invalid_config_file_fails_fast() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("ecan.toml");
    std::fs::write(&config, "rent_rate = 2.5\n").unwrap();

    ecan_cmd(&dir)
        .args(["stats", "--state", "cfg", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("rent_rate"));
}
