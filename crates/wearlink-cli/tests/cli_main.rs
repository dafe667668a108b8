//! Tests for the wearlink binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wearlink() -> Command {
    let mut cmd = Command::cargo_bin("wearlink").unwrap();
    for var in [
        "WEARLINK_DB_PATH",
        "WEARLINK_MIBAND_ADDRESS",
        "WEARLINK_PEBBLE_EMU_ADDR",
        "WEARLINK_PEBBLE_EMU_PORT",
        "WEARLINK_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn with_db(dir: &TempDir) -> Command {
    let mut cmd = wearlink();
    cmd.arg("--db").arg(dir.path().join("devices.redb"));
    cmd
}

#[test]
fn test_help_lists_commands() {
    wearlink()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("identify"))
        .stdout(predicate::str::contains("notify"))
        .stdout(predicate::str::contains("alarm"));
}

#[test]
fn test_version() {
    wearlink()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wearlink"));
}

#[test]
fn test_no_subcommand_is_usage_error() {
    wearlink().assert().failure().code(2);
}

#[test]
fn test_coordinators_in_priority_order() {
    let output = wearlink().arg("coordinators").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].contains("key 50"), "{}", lines[0]);
    assert!(lines[15].contains("key 210"), "{}", lines[15]);
}

#[test]
fn test_identify_bip_s() {
    wearlink()
        .args(["identify", "--address", "00:11:22:33:44:55", "--name", "Amazfit Bip S"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"device_type\": \"amazfit_bip_s\""))
        .stdout(predicate::str::contains("\"type_key\": 21"));
}

#[test]
fn test_identify_unknown() {
    wearlink()
        .args(["identify", "-a", "00:11:22:33:44:55", "--rssi", "-70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type_key\": -1"));
}

#[test]
fn test_notify_text_payload() {
    // 24 bytes: header, zero uid, crc32("a") = 0xE8B7BE43, then "a\0b\0c\0"
    wearlink()
        .args(["notify", "text", "-p", "a", "-s", "b", "-m", "c"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"handle\": \"0x0900\""))
        .stdout(predicate::str::contains("\"length\": 24"))
        .stdout(predicate::str::contains("\"payload\": \"18000a030204040202020000000043beb7e8610062006300\""));
}

#[test]
fn test_notify_missed_call() {
    wearlink()
        .args(["notify", "missed-call", "5551234"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0x0900"));
}

#[test]
fn test_asset_name_is_crc() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("icon.bin");
    std::fs::write(&path, b"123456789").unwrap();

    wearlink()
        .arg("asset")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"cbf43926\""))
        .stdout(predicate::str::contains("\"size\": 9"));
}

#[test]
fn test_asset_missing_file() {
    wearlink()
        .args(["asset", "/nonexistent/icon.bin"])
        .assert()
        .failure();
}

fn pair(dir: &TempDir, address: &str, name: &str) {
    with_db(dir)
        .args(["devices", "pair", "-a", address, "-n", name])
        .assert()
        .success();
}

#[test]
fn test_pair_list_remove() {
    let dir = TempDir::new().unwrap();
    pair(&dir, "AA:BB:CC:00:00:01", "Amazfit Bip Watch");

    with_db(&dir)
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AA:BB:CC:00:00:01"))
        .stdout(predicate::str::contains("amazfit_bip"));

    with_db(&dir)
        .args(["devices", "remove", "AA:BB:CC:00:00:01", "--unbond"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported on this platform"));

    with_db(&dir)
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AA:BB:CC:00:00:01"));

    with_db(&dir)
        .args(["devices", "remove", "AA:BB:CC:00:00:01"])
        .assert()
        .success();

    with_db(&dir)
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AA:BB:CC:00:00:01").not());
}

#[test]
fn test_pair_unrecognised_fails() {
    let dir = TempDir::new().unwrap();
    with_db(&dir)
        .args(["devices", "pair", "-a", "00:11:22:33:44:55"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no coordinator"));
}

#[test]
fn test_alarm_set_and_list() {
    let dir = TempDir::new().unwrap();
    pair(&dir, "AA:BB:CC:00:00:02", "Amazfit Bip Watch");

    with_db(&dir)
        .args([
            "alarm", "set", "-d", "AA:BB:CC:00:00:02", "-p", "1", "-t", "06:30", "--days", "mon,fri",
            "--smart-wakeup",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"repetition\": 17"))
        .stdout(predicate::str::contains("\"smart_wakeup\": false"));

    with_db(&dir)
        .args(["alarm", "list", "-d", "AA:BB:CC:00:00:02"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hour\": 6"))
        .stdout(predicate::str::contains("\"minute\": 30"));
}

#[test]
fn test_alarm_rejects_bad_time() {
    let dir = TempDir::new().unwrap();
    pair(&dir, "AA:BB:CC:00:00:03", "Amazfit Bip Watch");

    with_db(&dir)
        .args(["alarm", "set", "-d", "AA:BB:CC:00:00:03", "-p", "0", "-t", "25:00"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_alarm_on_unknown_address_fails() {
    let dir = TempDir::new().unwrap();
    with_db(&dir)
        .args(["alarm", "list", "-d", "FF:FF:FF:FF:FF:FF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no available device"));
}

#[test]
fn test_install_on_pebble_emulator() {
    let dir = TempDir::new().unwrap();
    let app = dir.path().join("app.pbw");
    std::fs::write(&app, b"PK\x03\x04\x14\x00\x00\x00").unwrap();

    with_db(&dir)
        .env("WEARLINK_PEBBLE_EMU_ADDR", "10.0.2.2")
        .env("WEARLINK_PEBBLE_EMU_PORT", "12344")
        .args(["install", "-d", "10.0.2.2:12344"])
        .arg(&app)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"app\""));

    let text = dir.path().join("notes.txt");
    std::fs::write(&text, b"hello").unwrap();
    install_fails(&dir, &text);
}

fn install_fails(dir: &TempDir, path: &Path) {
    with_db(dir)
        .env("WEARLINK_PEBBLE_EMU_ADDR", "10.0.2.2")
        .env("WEARLINK_PEBBLE_EMU_PORT", "12344")
        .args(["install", "-d", "10.0.2.2:12344"])
        .arg(path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be installed"));
}
