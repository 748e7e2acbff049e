mod common;

use std::fs;

use predicates::prelude::*;
use serde_json::json;

use common::{archive_sha256, entry, luma_cmd, sample_registry, write_manifest};

#[test]
fn test_validate_clean_registry_succeeds() {
    let tmp = sample_registry(&archive_sha256());
    luma_cmd()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stderr(predicate::str::contains("Validated 3 manifest(s)"));
}

#[test]
fn test_validate_discovers_root_from_subdirectory() {
    let tmp = sample_registry(&archive_sha256());
    luma_cmd()
        .current_dir(tmp.path().join("manifests").join("com.nexel.core"))
        .arg("validate")
        .assert()
        .success();
}

#[test]
fn test_validate_lists_every_defect() {
    let tmp = sample_registry(&archive_sha256());
    write_manifest(
        tmp.path(),
        "com.nexel.broken",
        vec![
            entry("1.0.0", "ABC", json!({})),
            entry("1.0.0", &archive_sha256(), json!({ "com.nexel.core": "^x" })),
        ],
    );

    luma_cmd()
        .args(["--registry"])
        .arg(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "com.nexel.broken@1.0.0: versions[0].shasum",
        ))
        .stdout(predicate::str::contains("(duplicate version)"))
        .stdout(predicate::str::contains("versions[1].dependencies.com.nexel.core"))
        .stderr(predicate::str::contains("3 problem(s) found"));
}

#[test]
fn test_validate_explicit_path() {
    let tmp = sample_registry(&archive_sha256());
    let bad = tmp.path().join("elsewhere.json");
    fs::write(&bad, r#"{"name": "com.nexel.x"}"#).unwrap();

    luma_cmd()
        .current_dir(tmp.path())
        .args(["validate", "manifests/com.nexel.app"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Validated 1 manifest(s)"));

    luma_cmd()
        .current_dir(tmp.path())
        .args(["validate", "elsewhere.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("versions: missing required field"));
}

#[test]
fn test_validate_missing_manifests_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    luma_cmd()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifests directory not found"));
}

#[test]
fn test_validate_package_descriptor() {
    let tmp = tempfile::TempDir::new().unwrap();
    fs::write(
        tmp.path().join("package.json"),
        r#"{"name": "com.nexel.ui", "version": "1.0", "displayName": "UI",
            "description": "Widgets", "engine": {"luma": "^1.0.0"}}"#,
    )
    .unwrap();

    luma_cmd()
        .current_dir(tmp.path())
        .args(["validate-package", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("com.nexel.ui@1.0: version: invalid version '1.0'"));
}
