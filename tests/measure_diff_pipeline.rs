//! End-to-end pipeline tests through the real binary
//!
//! Builds two fake project trees, measures each into a snapshot, then diffs
//! them and checks the rendered Markdown report.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BASE_HASH: &str = "0123456789abcdef0123";
const HEAD_HASH: &str = "fedcba98765432100123";

fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_asset-delta"))
}

fn write_asset(root: &Path, name: &str, contents: &str) {
    let path = root.join("dist/assets").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn measure_into(root: &Path, snapshot: &Path) {
    get_bin()
        .arg("measure")
        .arg("--root")
        .arg(root)
        .arg("--output")
        .arg(snapshot)
        .assert()
        .success();
}

/// Two builds of the same app: app.css grew, vendor.js shrank, the chunk
/// was rebuilt under a fresh fingerprint with identical contents.
fn fixture_snapshots() -> (TempDir, PathBuf, PathBuf) {
    let workspace = TempDir::new().unwrap();

    let base_root = workspace.path().join("base");
    write_asset(&base_root, &format!("app.{BASE_HASH}.css"), "body{margin:0}");
    write_asset(
        &base_root,
        &format!("vendor.{BASE_HASH}.js"),
        &"function v(){return 1;}\n".repeat(40),
    );
    write_asset(
        &base_root,
        &format!("chunk.routes.{BASE_HASH}.js"),
        "export default [];",
    );

    let head_root = workspace.path().join("head");
    write_asset(
        &head_root,
        &format!("app.{HEAD_HASH}.css"),
        "body{margin:0}\nh1{font-size:2rem}",
    );
    write_asset(
        &head_root,
        &format!("vendor.{HEAD_HASH}.js"),
        &"function v(){return 1;}\n".repeat(30),
    );
    write_asset(
        &head_root,
        &format!("chunk.routes.{HEAD_HASH}.js"),
        "export default [];",
    );

    let base_snapshot = workspace.path().join("base.json");
    let head_snapshot = workspace.path().join("head.json");
    measure_into(&base_root, &base_snapshot);
    measure_into(&head_root, &head_snapshot);

    (workspace, base_snapshot, head_snapshot)
}

#[test]
fn test_measure_emits_snapshot_json_on_stdout() {
    let workspace = TempDir::new().unwrap();
    let root = workspace.path().join("app");
    write_asset(&root, &format!("main.{BASE_HASH}.js"), "let m = 1;");

    let output = get_bin()
        .arg("measure")
        .arg("--root")
        .arg(&root)
        .output()
        .unwrap();

    assert!(output.status.success());
    let mapping: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let record = &mapping[format!("dist/assets/main.{BASE_HASH}.js")];
    assert_eq!(record["raw"], 10);
    assert!(record["gzip"].as_u64().unwrap() > 0);
    assert!(record["brotli"].as_u64().unwrap() > 0);
}

#[test]
fn test_diff_report_correlates_files_across_fingerprints() {
    let (_workspace, base, head) = fixture_snapshots();

    get_bin()
        .arg("diff")
        .arg(&base)
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::str::contains("Files that got Bigger 🚨:"))
        .stdout(predicate::str::contains("Files that got Smaller 🎉:"))
        .stdout(predicate::str::contains("Files that stayed the same size 🤷‍:"))
        // Hashes are stripped; logical names survive
        .stdout(predicate::str::contains("app.css|+"))
        .stdout(predicate::str::contains("vendor.js|-"))
        .stdout(predicate::str::contains("chunk.routes.js|0 B"))
        .stdout(predicate::str::contains(BASE_HASH).not())
        .stdout(predicate::str::contains(HEAD_HASH).not());
}

#[test]
fn test_diff_report_table_shape() {
    let (_workspace, base, head) = fixture_snapshots();

    let output = get_bin().arg("diff").arg(&base).arg(&head).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("File | raw | gzip | brotli"));
    assert!(stdout.contains("--- | --- | --- | ---"));
    // Changed files carry unsigned absolutes in parentheses
    assert!(stdout.contains('('));
}

#[test]
fn test_diff_json_output_is_parseable_and_complete() {
    let (_workspace, base, head) = fixture_snapshots();

    let output = get_bin()
        .arg("diff")
        .arg(&base)
        .arg(&head)
        .arg("--json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = diff.as_object().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.contains_key("app.css"));
    assert!(entries.contains_key("vendor.js"));
    assert!(entries.contains_key("chunk.routes.js"));
}

#[test]
fn test_new_file_appears_without_absolute_parentheses() {
    let workspace = TempDir::new().unwrap();
    let base = workspace.path().join("base.json");
    let head = workspace.path().join("head.json");
    fs::write(&base, "{}").unwrap();
    fs::write(
        &head,
        format!(r#"{{"dist/assets/fresh.{HEAD_HASH}.js": {{"raw": 2048, "gzip": 512, "brotli": 400}}}}"#),
    )
    .unwrap();

    get_bin()
        .arg("diff")
        .arg(&base)
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::str::contains("fresh.js|+2.00 KB|+512 B|+400 B"))
        .stdout(predicate::str::contains("(").not());
}

#[test]
fn test_deleted_files_are_not_reported() {
    let workspace = TempDir::new().unwrap();
    let base = workspace.path().join("base.json");
    let head = workspace.path().join("head.json");
    fs::write(
        &base,
        format!(r#"{{"dist/assets/gone.{BASE_HASH}.js": {{"raw": 100, "gzip": 50, "brotli": 40}}}}"#),
    )
    .unwrap();
    fs::write(&head, "{}").unwrap();

    get_bin()
        .arg("diff")
        .arg(&base)
        .arg(&head)
        .assert()
        .success()
        .stdout(predicate::str::contains("gone.js").not());
}
