use std::fs;
use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use luma_index::DiagnosticKind;
use luma_ops::ops_index::index;
use luma_ops::ops_resolve::{render, resolve, ResolveOptions, ResolveView};
use luma_ops::ops_validate::validate;
use luma_ops::ops_validate_package::validate_package;
use luma_ops::ops_verify::verify;
use luma_ops::Registry;

const ARCHIVE: &[u8] = b"luma archive bytes";

fn archive_sum() -> String {
    luma_util::hash::sha256_reader(ARCHIVE).unwrap()
}

fn entry(version: &str, deps: Value) -> Value {
    json!({
        "version": version,
        "shasum": archive_sum(),
        "url": format!("https://cdn.example.com/{version}.zip"),
        "published": "2025-04-01T00:00:00Z",
        "size": ARCHIVE.len(),
        "dependencies": deps
    })
}

fn write_manifest(root: &Path, dir: &str, manifest: Value) {
    let pkg_dir = root.join("manifests").join(dir);
    fs::create_dir_all(&pkg_dir).unwrap();
    fs::write(
        pkg_dir.join("index.json"),
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
}

fn sample_registry() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_manifest(
        tmp.path(),
        "com.nexel.app",
        json!({ "name": "com.nexel.app", "versions": [entry("1.0.0", json!({ "com.nexel.core": "^1.0.0" }))] }),
    );
    write_manifest(
        tmp.path(),
        "com.nexel.core",
        json!({ "name": "com.nexel.core", "versions": [entry("1.2.0", json!({})), entry("1.0.0", json!({}))] }),
    );
    write_manifest(
        tmp.path(),
        "org.someone.skin",
        json!({ "name": "org.someone.skin", "versions": [entry("0.3.0", json!({}))] }),
    );
    tmp
}

#[test]
fn test_validate_clean_registry() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let report = validate(&registry, &[]).unwrap();
    assert_eq!(report.files, 3);
    assert_eq!(report.valid, 3);
    assert!(report.is_clean());
}

#[test]
fn test_validate_reports_invalid_json_and_schema() {
    let tmp = sample_registry();
    let bad_dir = tmp.path().join("manifests").join("com.nexel.bad");
    fs::create_dir_all(&bad_dir).unwrap();
    fs::write(bad_dir.join("index.json"), "{ not json").unwrap();
    write_manifest(
        tmp.path(),
        "com.nexel.half",
        json!({ "name": "com.nexel.half", "versions": [{ "version": "1.0.0" }] }),
    );

    let registry = Registry::open(tmp.path()).unwrap();
    let report = validate(&registry, &[]).unwrap();
    assert_eq!(report.files, 5);
    assert_eq!(report.valid, 3);
    assert!(report
        .errors
        .iter()
        .any(|e| e.package == "com.nexel.bad" && e.kind == DiagnosticKind::Parse));
    assert!(report
        .errors
        .iter()
        .any(|e| e.package == "com.nexel.half" && e.kind == DiagnosticKind::Schema));
}

#[test]
fn test_validate_explicit_paths() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let paths = vec![tmp.path().join("manifests").join("com.nexel.core")];
    let report = validate(&registry, &paths).unwrap();
    assert_eq!(report.files, 1);
    assert!(report.is_clean());
}

#[test]
fn test_validate_reports_duplicate_package() {
    let tmp = sample_registry();
    write_manifest(
        tmp.path(),
        "core-copy",
        json!({ "name": "com.nexel.core", "versions": [entry("9.0.0", json!({}))] }),
    );
    let registry = Registry::open(tmp.path()).unwrap();
    let report = validate(&registry, &[]).unwrap();
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].kind, DiagnosticKind::DuplicatePackage);
}

#[test]
fn test_validate_groups_index_diagnostics_by_package() {
    let tmp = sample_registry();
    write_manifest(
        tmp.path(),
        "core-copy",
        json!({ "name": "com.nexel.core", "versions": [entry("9.0.0", json!({}))] }),
    );
    let mut broken = entry("1.0.0", json!({}));
    broken["shasum"] = json!("not-a-digest");
    broken["size"] = json!(0);
    write_manifest(
        tmp.path(),
        "aaa-broken",
        json!({ "name": "org.someone.zz", "versions": [broken] }),
    );

    let registry = Registry::open(tmp.path()).unwrap();
    let report = validate(&registry, &[]).unwrap();
    let packages: Vec<&str> = report.errors.iter().map(|e| e.package.as_str()).collect();
    assert_eq!(packages, vec!["com.nexel.core", "org.someone.zz", "org.someone.zz"]);
    assert_eq!(report.errors[0].kind, DiagnosticKind::DuplicatePackage);
    assert_eq!(report.errors[1].field, "versions[0].shasum");
}

#[test]
fn test_index_written_then_stable() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();

    let first = index(&registry, false).unwrap();
    assert!(first.written);
    assert_eq!(first.revision, 1);
    assert_eq!(first.packages, 3);
    let text = fs::read_to_string(tmp.path().join("index.json")).unwrap();

    let second = index(&registry, false).unwrap();
    assert!(second.up_to_date);
    assert!(!second.written);
    assert_eq!(fs::read_to_string(tmp.path().join("index.json")).unwrap(), text);

    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["registry"], "Luma Package Registry");
    assert_eq!(doc["packages"]["registry"]["com.nexel.core"]["latest"], "1.2.0");
    assert_eq!(
        doc["packages"]["assets-store"]["org.someone.skin"]["versions"],
        json!(["0.3.0"])
    );
}

#[test]
fn test_index_check_detects_stale_and_revision_bumps() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    index(&registry, false).unwrap();

    write_manifest(
        tmp.path(),
        "com.nexel.core",
        json!({ "name": "com.nexel.core", "versions": [entry("1.3.0", json!({})), entry("1.2.0", json!({})), entry("1.0.0", json!({}))] }),
    );

    let check = index(&registry, true).unwrap();
    assert!(!check.up_to_date);
    assert!(!check.written);

    let rebuilt = index(&registry, false).unwrap();
    assert_eq!(rebuilt.revision, 2);
}

#[test]
fn test_resolve_plan_and_views() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let opts = ResolveOptions {
        package: "com.nexel.app".into(),
        ..Default::default()
    };
    let plan = resolve(&registry, &opts).unwrap().unwrap();

    assert_eq!(
        render(&plan, &ResolveView::Plan).unwrap(),
        "com.nexel.core 1.2.0\ncom.nexel.app 1.0.0\n"
    );
    assert!(render(&plan, &ResolveView::Tree)
        .unwrap()
        .contains("└── com.nexel.core@1.2.0 (^1.0.0)"));
    assert_eq!(
        render(&plan, &ResolveView::Why("core".into())).unwrap(),
        "com.nexel.app@1.0.0\n  com.nexel.core@1.2.0\n"
    );
    assert!(render(&plan, &ResolveView::Why("org.someone.skin".into())).is_err());
}

#[test]
fn test_resolve_failure_is_error() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let opts = ResolveOptions {
        package: "com.nexel.core".into(),
        constraint: Some("^2.0.0".into()),
        view: ResolveView::Plan,
    };
    let failure = resolve(&registry, &opts).unwrap().unwrap_err();
    assert_eq!(failure.len(), 1);
    assert!(failure.errors[0]
        .to_string()
        .contains("the newest published version is 1.2.0"));

    let bad = ResolveOptions {
        package: "Core".into(),
        ..Default::default()
    };
    assert!(resolve(&registry, &bad).is_err());
}

#[test]
fn test_verify_archive() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let archive = tmp.path().join("core.zip");
    fs::write(&archive, ARCHIVE).unwrap();

    let outcome = verify(&registry, &archive, "com.nexel.core", "1.2.0").unwrap();
    assert_eq!(outcome.digest, archive_sum());
    assert_eq!(outcome.size, ARCHIVE.len() as u64);

    fs::write(&archive, b"tampered archive!!").unwrap();
    let err = verify(&registry, &archive, "com.nexel.core", "1.2.0").unwrap_err();
    assert!(err.to_string().contains("checksum mismatch"));

    assert!(verify(&registry, &archive, "com.nexel.core", "7.0.0").is_err());
}

#[test]
fn test_verify_checks_size_before_digest() {
    let tmp = sample_registry();
    let registry = Registry::open(tmp.path()).unwrap();
    let archive = tmp.path().join("core.zip");
    fs::write(&archive, b"short").unwrap();

    let err = verify(&registry, &archive, "com.nexel.core", "1.2.0").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("size mismatch"), "got: {msg}");
    assert!(msg.contains("found 5"), "got: {msg}");

    let missing = tmp.path().join("absent.zip");
    assert!(verify(&registry, &missing, "com.nexel.core", "1.2.0").is_err());
}

#[test]
fn test_validate_package_descriptor() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("package.json");
    fs::write(
        &path,
        serde_json::to_string(&json!({
            "name": "com.nexel.ui",
            "version": "1.0.0",
            "displayName": "UI",
            "description": "Widgets",
            "engine": { "luma": ">=1.0.0" }
        }))
        .unwrap(),
    )
    .unwrap();
    assert!(validate_package(tmp.path()).unwrap().is_empty());

    fs::write(&path, "{}").unwrap();
    assert_eq!(validate_package(&path).unwrap().len(), 5);

    fs::write(&path, "[").unwrap();
    assert!(validate_package(&path).is_err());
}
