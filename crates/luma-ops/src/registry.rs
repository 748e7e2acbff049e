//! A registry checkout on disk: `luma.toml`, the manifests tree and `index.json`.

use std::path::{Path, PathBuf};

use luma_core::config::{find_registry_root, RegistryConfig};
use luma_core::Manifest;
use luma_index::{ValidationError, Validator};

use crate::source::{DirectorySource, ManifestSource};

/// An opened registry root with its configuration.
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
    config: RegistryConfig,
}

/// Every manifest that passed validation, plus the diagnostics for those that didn't.
#[derive(Debug, Default)]
pub struct LoadedRegistry {
    pub manifests: Vec<Manifest>,
    pub errors: Vec<ValidationError>,
    /// Number of manifest files read.
    pub files: usize,
}

impl Registry {
    pub fn open(root: &Path) -> miette::Result<Self> {
        let config = RegistryConfig::load(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Open the nearest registry at or above `start`.
    pub fn discover(start: &Path) -> miette::Result<Self> {
        Self::open(&find_registry_root(start))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn manifests_dir(&self) -> PathBuf {
        self.config.manifests_path(&self.root)
    }

    pub fn index_path(&self) -> PathBuf {
        self.config.index_path(&self.root)
    }

    pub fn validator(&self) -> Validator {
        Validator::from_config(&self.config.categories)
    }

    pub fn source(&self) -> DirectorySource {
        DirectorySource::new(self.manifests_dir())
    }

    /// Load and validate every manifest under the manifests directory.
    pub fn load(&self) -> miette::Result<LoadedRegistry> {
        let source = self.source();
        let validator = self.validator();
        let mut loaded = LoadedRegistry::default();
        for file in source.files()? {
            loaded.files += 1;
            let checked = file.check(&validator);
            loaded.errors.extend(checked.errors);
            loaded.manifests.extend(checked.manifest);
        }
        tracing::debug!(
            "loaded {} of {} manifest(s) from {}",
            loaded.manifests.len(),
            loaded.files,
            self.root.display()
        );
        Ok(loaded)
    }
}
