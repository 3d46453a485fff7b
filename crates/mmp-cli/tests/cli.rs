// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! End-to-end runs of the `mmp-opcua` binary.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use mmp_dry_tests::machine_with_two_sensors;
use mmp_opcua::RawNodeSet;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("model.json");
    let set = RawNodeSet {
        nodes: machine_with_two_sensors(),
    };
    std::fs::write(&path, serde_json::to_vec(&set).unwrap()).unwrap();
    path
}

fn cli(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mmp-opcua").expect("binary builds");
    cmd.arg("--config-dir").arg(config_dir);
    cmd
}

#[test]
fn parse_prints_snapshot_json() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(dir.path());

    let output = cli(&dir.path().join("cfg"))
        .arg("parse")
        .arg(&model)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["machine"]["displayName"], "Machine");
    assert_eq!(json["sensors"][0]["displayName"], "LichtSensor");
    assert_eq!(json["sensors"][1]["displayName"], "TemperaturSensor");
    assert_eq!(
        json["sensors"][0]["components"][1]["variables"][0]["value"],
        "0"
    );
}

#[test]
fn sensor_type_override_changes_classification() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(dir.path());

    // Only the light sensor type matches; the base sensor type no longer does.
    let output = cli(&dir.path().join("cfg"))
        .args(["parse", "--sensor-type", "ns=1;i=1003"])
        .arg(&model)
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sensors = json["sensors"].as_array().unwrap();
    assert_eq!(sensors.len(), 1);
    assert_eq!(sensors[0]["displayName"], "LichtSensor");
}

#[test]
fn summary_format_shows_table() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(dir.path());

    cli(&dir.path().join("cfg"))
        .args(["parse", "--format", "summary"])
        .arg(&model)
        .assert()
        .success()
        .stdout(predicate::str::contains("dangling references"))
        .stdout(predicate::str::contains("TemperaturSensor"));
}

#[test]
fn duplicate_ids_fail_with_message() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("dup.json");
    std::fs::write(
        &model,
        br#"{"nodes":[{"nodeId":"ns=1;i=1"},{"nodeId":"ns=1;i=1"}]}"#,
    )
    .unwrap();

    cli(&dir.path().join("cfg"))
        .arg("parse")
        .arg(&model)
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate node id ns=1;i=1"));
}

#[test]
fn missing_file_fails() {
    let dir = TempDir::new().unwrap();
    cli(&dir.path().join("cfg"))
        .arg("parse")
        .arg(dir.path().join("absent.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn config_init_then_show_round_trips() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("cfg");

    cli(&cfg)
        .args(["config", "init", "--machine-type", "ns=4;i=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("opcua_parser.json"));
    assert!(cfg.join("opcua_parser.json").is_file());

    let output = cli(&cfg).args(["config", "show"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["machineTypeId"], "ns=4;i=1");
    assert_eq!(json["sensorTypeId"], "ns=1;i=1");

    cli(&cfg)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    cli(&cfg).args(["config", "init", "--force"]).assert().success();
}

#[test]
fn stored_machine_type_applies_to_parse() {
    let dir = TempDir::new().unwrap();
    let cfg = dir.path().join("cfg");
    let model = write_fixture(dir.path());

    cli(&cfg)
        .args(["config", "init", "--machine-type", "ns=9;i=9"])
        .assert()
        .success();

    let output = cli(&cfg).arg("parse").arg(&model).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["machine"].is_null());
    assert_eq!(json["sensors"].as_array().unwrap().len(), 2);
}
