#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const ARCHIVE: &[u8] = b"luma archive bytes";

pub fn archive_sha256() -> String {
    luma_util::hash::sha256_reader(ARCHIVE).unwrap()
}

pub fn luma_cmd() -> Command {
    Command::cargo_bin("luma").unwrap()
}

pub fn entry(version: &str, shasum: &str, deps: Value) -> Value {
    json!({
        "version": version,
        "shasum": shasum,
        "url": format!("https://cdn.example.com/{version}.zip"),
        "published": "2025-04-01T00:00:00Z",
        "size": ARCHIVE.len(),
        "dependencies": deps
    })
}

pub fn write_manifest(root: &Path, name: &str, versions: Vec<Value>) {
    let dir = root.join("manifests").join(name);
    fs::create_dir_all(&dir).unwrap();
    let manifest = json!({ "name": name, "versions": versions });
    fs::write(
        dir.join("index.json"),
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

/// A registry with `luma.toml`, an app depending on core, and a third-party skin.
pub fn sample_registry(shasum: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("luma.toml"),
        "[registry]\nname = \"Test Registry\"\n",
    )
    .unwrap();
    write_manifest(
        tmp.path(),
        "com.nexel.app",
        vec![entry("1.0.0", shasum, json!({ "com.nexel.core": "^1.0.0" }))],
    );
    write_manifest(
        tmp.path(),
        "com.nexel.core",
        vec![
            entry("1.2.0", shasum, json!({})),
            entry("1.0.0", shasum, json!({})),
        ],
    );
    write_manifest(
        tmp.path(),
        "org.someone.skin",
        vec![entry("0.3.0", shasum, json!({}))],
    );
    tmp
}
