mod common;

use std::fs;

use predicates::prelude::*;
use serde_json::{json, Value};

use common::{archive_sha256, entry, luma_cmd, sample_registry, write_manifest};

#[test]
fn test_index_writes_grouped_document() {
    let tmp = sample_registry(&archive_sha256());
    luma_cmd()
        .current_dir(tmp.path())
        .arg("index")
        .assert()
        .success()
        .stderr(predicate::str::contains("Indexed 3 package(s), revision 1"));

    let doc: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("index.json")).unwrap()).unwrap();
    assert_eq!(doc["registry"], "Test Registry");
    assert_eq!(doc["revision"], 1);
    assert_eq!(
        doc["packages"]["registry"]["com.nexel.core"],
        json!({ "latest": "1.2.0", "versions": ["1.2.0", "1.0.0"] })
    );
    assert!(doc["packages"]["assets-store"]["org.someone.skin"].is_object());
}

#[test]
fn test_index_rerun_is_byte_identical() {
    let tmp = sample_registry(&archive_sha256());
    luma_cmd().current_dir(tmp.path()).arg("index").assert().success();
    let first = fs::read(tmp.path().join("index.json")).unwrap();

    luma_cmd()
        .current_dir(tmp.path())
        .arg("index")
        .assert()
        .success()
        .stderr(predicate::str::contains("unchanged (revision 1)"));
    assert_eq!(fs::read(tmp.path().join("index.json")).unwrap(), first);
}

#[test]
fn test_index_check() {
    let tmp = sample_registry(&archive_sha256());
    luma_cmd()
        .current_dir(tmp.path())
        .args(["index", "--check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of date"));
    assert!(!tmp.path().join("index.json").exists());

    luma_cmd().current_dir(tmp.path()).arg("index").assert().success();
    luma_cmd()
        .current_dir(tmp.path())
        .args(["index", "--check"])
        .assert()
        .success();

    write_manifest(
        tmp.path(),
        "org.someone.skin",
        vec![
            entry("0.4.0", &archive_sha256(), json!({})),
            entry("0.3.0", &archive_sha256(), json!({})),
        ],
    );
    luma_cmd()
        .current_dir(tmp.path())
        .args(["index", "--check"])
        .assert()
        .failure();
    luma_cmd()
        .current_dir(tmp.path())
        .arg("index")
        .assert()
        .success()
        .stderr(predicate::str::contains("revision 2"));
}

#[test]
fn test_index_excludes_invalid_manifests() {
    let tmp = sample_registry(&archive_sha256());
    write_manifest(tmp.path(), "com.nexel.empty", vec![]);
    luma_cmd()
        .current_dir(tmp.path())
        .arg("index")
        .assert()
        .success()
        .stderr(predicate::str::contains("com.nexel.empty: versions"))
        .stderr(predicate::str::contains("Indexed 3 package(s)"));
}
