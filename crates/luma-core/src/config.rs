use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the registry configuration at the registry root.
pub const CONFIG_FILE: &str = "luma.toml";

/// Registry configuration loaded from `luma.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub categories: CategoryConfig,
}

/// Identity written into the global index from `[registry]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrySection {
    #[serde(default = "default_registry_name")]
    pub name: String,
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for RegistrySection {
    fn default() -> Self {
        Self {
            name: default_registry_name(),
            schema: default_schema(),
        }
    }
}

fn default_registry_name() -> String {
    "Luma Package Registry".to_string()
}

fn default_schema() -> String {
    "https://json-schema.org/draft/2020-12/schema".to_string()
}

/// On-disk layout from `[layout]`, relative to the registry root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_manifests_dir", rename = "manifests-dir")]
    pub manifests_dir: String,
    #[serde(default = "default_index_file", rename = "index-file")]
    pub index_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            manifests_dir: default_manifests_dir(),
            index_file: default_index_file(),
        }
    }
}

fn default_manifests_dir() -> String {
    "manifests".to_string()
}

fn default_index_file() -> String {
    "index.json".to_string()
}

/// Category inference settings from `[categories]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default = "default_core_prefixes", rename = "core-prefixes")]
    pub core_prefixes: Vec<String>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            core_prefixes: default_core_prefixes(),
        }
    }
}

fn default_core_prefixes() -> Vec<String> {
    vec!["com.nexel.".to_string()]
}

impl RegistryConfig {
    /// Load `luma.toml` from the registry root, or return defaults if the file doesn't exist.
    pub fn load(root: &Path) -> miette::Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            tracing::debug!("no {CONFIG_FILE} at {}, using defaults", root.display());
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).map_err(|e| luma_util::errors::LumaError::Config {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
        Self::parse(&content).map_err(|e| {
            luma_util::errors::LumaError::Config {
                message: format!("Failed to parse {}: {e}", path.display()),
            }
            .into()
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn manifests_path(&self, root: &Path) -> PathBuf {
        root.join(&self.layout.manifests_dir)
    }

    pub fn index_path(&self, root: &Path) -> PathBuf {
        root.join(&self.layout.index_file)
    }
}

/// Locate the registry root: the nearest ancestor of `start` holding `luma.toml`,
/// or `start` itself when none does.
pub fn find_registry_root(start: &Path) -> PathBuf {
    luma_util::fs::find_ancestor_with(start, CONFIG_FILE).unwrap_or_else(|| start.to_path_buf())
}
