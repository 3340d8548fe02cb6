//! Integration tests for the barcode-bridge harness CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bridge() -> Command {
    let mut cmd = Command::cargo_bin("barcode-bridge").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Test CLI binary exists and responds to -h and --help
#[test]
fn test_cli_help() {
    bridge()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Native barcode scanner bridge harness"));

    bridge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Exercises the barcode-bridge library against a simulated native scanner",
        ));
}

/// Test CLI responds to --version
#[test]
fn test_cli_version() {
    bridge()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("barcode-bridge"));
}

/// Test invalid subcommand shows error
#[test]
fn test_invalid_subcommand() {
    bridge()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_formats_lists_every_symbology() {
    let assert = bridge().arg("formats").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    for name in ["Code128", "EAN13", "QRCode", "PDF417", "Aztec"] {
        assert!(stdout.contains(name), "missing {name} in:\n{stdout}");
    }
    assert!(stdout.contains("6143"));
}

#[test]
fn test_encode_and_decode() {
    bridge()
        .args(["encode", "QRCode", "EAN13"])
        .assert()
        .success()
        .stdout("288\n");

    bridge()
        .args(["decode", "32"])
        .assert()
        .success()
        .stdout("EAN13\n");
}

#[test]
fn test_decode_verbose_describes_the_bit() {
    bridge()
        .args(["--verbose", "decode", "2048"])
        .assert()
        .success()
        .stdout("PDF417\n")
        .stderr(predicate::str::contains("Code 2048 is the PDF417 bit, default off"));
}

#[test]
fn test_decode_rejects_multi_bit_code() {
    bridge()
        .args(["decode", "288"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No barcode format has code 288"));
}

#[test]
fn test_encode_rejects_unknown_format() {
    bridge()
        .args(["encode", "Barcode9000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown barcode format"));
}

#[test]
fn test_normalize_merges_over_defaults() {
    let assert = bridge()
        .args(["normalize", r#"{"formats":{"QRCode":true},"vibrateOnSuccess":true}"#])
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["formats"], 256);
    assert_eq!(value["vibrateOnSuccess"], true);
    assert_eq!(value["showTorchButton"], true);
}

#[test]
fn test_normalize_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("scan.json");
    fs::write(&config_path, r#"[1, 2, 3]"#).unwrap();

    let assert = bridge()
        .arg("normalize")
        .arg("--config-file")
        .arg(&config_path)
        .assert()
        .success();

    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["formats"], 6143);
}

#[test]
fn test_normalize_rejects_invalid_json() {
    bridge()
        .args(["normalize", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn test_scan_success() {
    bridge()
        .args(["scan", "--respond", "success:012345678905:32"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""format": "EAN13""#))
        .stdout(predicate::str::contains(r#""text": "012345678905""#));
}

#[test]
fn test_scan_cancelled() {
    bridge()
        .args(["scan", "--respond", "cancel"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""cancelled": true"#))
        .stdout(predicate::str::contains("Scan was cancelled."));
}

#[test]
fn test_scan_busy() {
    bridge()
        .args(["scan", "--respond", "busy"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Another scan is already in progress."));
}

#[test]
fn test_scan_native_error_message() {
    bridge()
        .args(["scan", "--respond", "error:Camera unavailable"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Camera unavailable"));
}

#[test]
fn test_settings_file_changes_native_target() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("bridge.toml");
    fs::write(&settings_path, "service = \"mlkit-barcode\"\n").unwrap();

    bridge()
        .arg("--settings")
        .arg(&settings_path)
        .args(["--verbose", "scan", "--respond", "success:abc:QRCode"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Native call mlkit-barcode.startScan"));
}

#[test]
fn test_missing_settings_file_fails() {
    bridge()
        .args(["--settings", "does-not-exist.toml", "formats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Settings file not found"));
}
