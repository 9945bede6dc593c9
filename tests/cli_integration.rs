//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

/// Run wtree and return (stdout, stderr, success)
fn run_wtree(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_wtree"))
        .args(["-f", "json"])
        .args(args)
        .output()
        .expect("Failed to execute wtree");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Write a manifest with three entries summing to 7/8
fn write_manifest(dir: &Path) -> PathBuf {
    let path = dir.join("tree.json");
    std::fs::write(
        &path,
        r#"{
            "hash": "keccak256",
            "entries": [
                { "value": "7631", "weight": 0.5 },
                { "value": "7632", "weight": 0.25 },
                { "value": "7633", "weight": 0.125 }
            ]
        }"#,
    )
    .unwrap();
    path
}

fn parse(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be JSON")
}

// ============================================================================
// Tree Commands
// ============================================================================

#[test]
fn test_cli_root() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (stdout, _stderr, success) = run_wtree(&["root", manifest.to_str().unwrap()]);
    assert!(success, "root should succeed");

    let json = parse(&stdout);
    assert_eq!(json["hash"], "keccak256");
    assert_eq!(json["entries"], 3);
    assert_eq!(json["padding"], 1);
    assert_eq!(json["leaves"], 4);
    assert_eq!(json["root"].as_str().unwrap().len(), 64);
}

#[test]
fn test_cli_hash_override_changes_root() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());
    let path = manifest.to_str().unwrap();

    let (keccak, _, _) = run_wtree(&["root", path]);
    let (blake, _, success) = run_wtree(&["--hash", "blake3", "root", path]);
    assert!(success);

    let blake = parse(&blake);
    assert_eq!(blake["hash"], "blake3");
    assert_ne!(parse(&keccak)["root"], blake["root"]);
}

#[test]
fn test_cli_layout_tiles_unit_interval() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (stdout, _stderr, success) = run_wtree(&["layout", manifest.to_str().unwrap()]);
    assert!(success);

    let json = parse(&stdout);
    assert_eq!(json["count"], 4);
    let leaves = json["leaves"].as_array().unwrap();
    let mut position = 0.0;
    for leaf in leaves {
        assert_eq!(leaf["start"].as_f64().unwrap(), position);
        position = leaf["end"].as_f64().unwrap();
    }
    assert_eq!(position, 1.0);
}

#[test]
fn test_cli_invalid_weight_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        r#"{ "entries": [ { "value": "01", "weight": 0.3 } ] }"#,
    )
    .unwrap();

    let (_stdout, stderr, success) = run_wtree(&["root", path.to_str().unwrap()]);
    assert!(!success, "non-dyadic weight should be rejected");
    assert!(stderr.contains("Invalid entry weight"), "got: {}", stderr);
}

// ============================================================================
// Proof Commands
// ============================================================================

#[test]
fn test_cli_prove_then_verify() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (stdout, _stderr, success) = run_wtree(&["prove", manifest.to_str().unwrap(), "7631"]);
    assert!(success, "prove should succeed");
    let proved = parse(&stdout);
    assert_eq!(proved["interval"], "[0/2, 1/2)");

    let root = proved["root"].as_str().unwrap().to_string();
    let digests: Vec<String> = proved["proof"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect();
    assert_eq!(digests.len(), 2);

    let mut args = vec!["verify", "--root", root.as_str()];
    args.extend(digests.iter().map(String::as_str));
    let (stdout, _stderr, success) = run_wtree(&args);
    assert!(success, "verify should succeed");

    let verified = parse(&stdout);
    assert_eq!(verified["status"], "ok");
    assert_eq!(verified["start"], 0.0);
    assert_eq!(verified["end"], 0.5);
    assert_eq!(verified["weight"], 0.5);
}

#[test]
fn test_cli_verify_rejects_wrong_root() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (stdout, _, _) = run_wtree(&["prove", manifest.to_str().unwrap(), "7632"]);
    let proved = parse(&stdout);
    let digests: Vec<String> = proved["proof"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect();

    let wrong_root = "00".repeat(32);
    let mut args = vec!["verify", "--root", wrong_root.as_str()];
    args.extend(digests.iter().map(String::as_str));
    let (_stdout, stderr, success) = run_wtree(&args);
    assert!(!success);
    assert!(stderr.contains("Invalid merkle proof"), "got: {}", stderr);
}

#[test]
fn test_cli_prove_unknown_value_fails() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (_stdout, _stderr, success) =
        run_wtree(&["prove", manifest.to_str().unwrap(), "ffff"]);
    assert!(!success);

    let (_stdout, stderr, success) = run_wtree(&[
        "prove",
        manifest.to_str().unwrap(),
        "7631",
        "--weight",
        "0.25",
    ]);
    assert!(!success);
    assert!(stderr.contains("not a leaf"), "got: {}", stderr);
}

#[test]
fn test_cli_select() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path());

    let (stdout, _stderr, success) = run_wtree(&["select", manifest.to_str().unwrap(), "0.25"]);
    assert!(success);
    let json = parse(&stdout);
    assert_eq!(json["value"], "7631");
    assert_eq!(json["weight"], 0.5);

    let (_stdout, _stderr, success) = run_wtree(&["select", manifest.to_str().unwrap(), "1.5"]);
    assert!(!success);
}
