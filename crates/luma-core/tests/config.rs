use luma_core::config::{find_registry_root, RegistryConfig, CONFIG_FILE};
use tempfile::TempDir;

#[test]
fn test_default_layout() {
    let config = RegistryConfig::default();
    assert_eq!(config.layout.manifests_dir, "manifests");
    assert_eq!(config.layout.index_file, "index.json");
}

#[test]
fn test_default_core_prefix() {
    let config = RegistryConfig::default();
    assert_eq!(config.categories.core_prefixes, vec!["com.nexel.".to_string()]);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = RegistryConfig::parse("").unwrap();
    assert_eq!(config.registry.name, "Luma Package Registry");
    assert_eq!(config.layout.manifests_dir, "manifests");
}

#[test]
fn test_parse_full_config() {
    let toml = r#"
[registry]
name = "Staging Registry"

[layout]
manifests-dir = "pkgs"
index-file = "out/index.json"

[categories]
core-prefixes = ["com.nexel.", "io.luma."]
"#;
    let config = RegistryConfig::parse(toml).unwrap();
    assert_eq!(config.registry.name, "Staging Registry");
    assert_eq!(
        config.registry.schema,
        "https://json-schema.org/draft/2020-12/schema"
    );
    assert_eq!(config.layout.manifests_dir, "pkgs");
    assert_eq!(config.layout.index_file, "out/index.json");
    assert_eq!(config.categories.core_prefixes.len(), 2);
}

#[test]
fn test_unknown_section_rejected() {
    assert!(RegistryConfig::parse("[publish]\ntoken = \"x\"\n").is_err());
}

#[test]
fn test_load_missing_file_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = RegistryConfig::load(tmp.path()).unwrap();
    assert_eq!(config.layout.index_file, "index.json");
}

#[test]
fn test_load_reads_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE),
        "[layout]\nmanifests-dir = \"m\"\n",
    )
    .unwrap();
    let config = RegistryConfig::load(tmp.path()).unwrap();
    assert_eq!(config.manifests_path(tmp.path()), tmp.path().join("m"));
}

#[test]
fn test_load_invalid_toml_errors() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(CONFIG_FILE), "[layout\n").unwrap();
    assert!(RegistryConfig::load(tmp.path()).is_err());
}

#[test]
fn test_find_registry_root_walks_up() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
    let nested = tmp.path().join("manifests").join("com.nexel.ui");
    std::fs::create_dir_all(&nested).unwrap();
    assert_eq!(find_registry_root(&nested), tmp.path().to_path_buf());
}

#[test]
fn test_find_registry_root_falls_back_to_start() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(find_registry_root(tmp.path()), tmp.path().to_path_buf());
}
