//! Where raw manifest records come from.

use std::path::{Path, PathBuf};

use serde_json::Value;

use luma_index::{Checked, DiagnosticKind, ValidationError, Validator};
use luma_util::errors::LumaError;

/// File name of a package manifest inside its directory.
pub const MANIFEST_FILE: &str = "index.json";

/// One manifest file, read and parsed as JSON but not yet validated.
#[derive(Debug, Clone)]
pub struct ManifestFile {
    pub path: PathBuf,
    /// Name used in diagnostics when the record itself carries none.
    pub label: String,
    /// The parsed record, or why it could not be read or parsed.
    pub contents: Result<Value, String>,
}

impl ManifestFile {
    /// Read and parse `path`. Failures are kept in `contents`, not returned.
    pub fn read(path: &Path) -> Self {
        let label = path
            .parent()
            .and_then(Path::file_name)
            .or_else(|| path.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let contents: Result<Value, String> = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))
            .and_then(|text| {
                serde_json::from_str(&text).map_err(|e| format!("invalid JSON: {e}"))
            });
        Self {
            path: path.to_path_buf(),
            label,
            contents,
        }
    }

    /// Validate the record; an unreadable file yields a single parse diagnostic.
    pub fn check(&self, validator: &Validator) -> Checked {
        match &self.contents {
            Ok(value) => validator.check(value),
            Err(message) => Checked {
                manifest: None,
                errors: vec![ValidationError::new(
                    &self.label,
                    None,
                    "$",
                    DiagnosticKind::Parse,
                    message.clone(),
                )],
            },
        }
    }
}

/// A provider of raw manifest files.
pub trait ManifestSource {
    /// Every manifest file, in a stable order.
    fn files(&self) -> miette::Result<Vec<ManifestFile>>;
}

/// Manifests laid out as `<dir>/<package>/index.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ManifestSource for DirectorySource {
    fn files(&self) -> miette::Result<Vec<ManifestFile>> {
        if !self.dir.is_dir() {
            return Err(LumaError::Manifest {
                message: format!("manifests directory not found at {}", self.dir.display()),
            }
            .into());
        }

        let mut package_dirs = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(LumaError::Io)? {
            let path = entry.map_err(LumaError::Io)?.path();
            if path.is_dir() {
                package_dirs.push(path);
            }
        }
        package_dirs.sort();

        let mut files = Vec::new();
        for dir in package_dirs {
            let manifest = dir.join(MANIFEST_FILE);
            if manifest.is_file() {
                files.push(ManifestFile::read(&manifest));
            } else {
                tracing::debug!("skipping {}: no {MANIFEST_FILE}", dir.display());
            }
        }
        Ok(files)
    }
}
