//! Operation: validate registry manifests.

use std::path::PathBuf;

use luma_index::{consolidate, ValidationError};

use crate::registry::Registry;
use crate::source::{ManifestFile, MANIFEST_FILE};

/// Outcome of `luma validate`.
#[derive(Debug, Default)]
pub struct ValidateReport {
    /// Manifest files examined.
    pub files: usize,
    /// Files that produced a manifest with no diagnostics.
    pub valid: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidateReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate the given manifest files, or the whole registry when `paths` is empty.
///
/// A path may name a manifest file or a package directory containing one.
/// Whole-registry runs also report index-wide problems: duplicate package
/// names and manifests with no versions.
pub fn validate(registry: &Registry, paths: &[PathBuf]) -> miette::Result<ValidateReport> {
    if paths.is_empty() {
        let loaded = registry.load()?;
        let (_, index_errors) = consolidate(&loaded.manifests);
        let mut report = ValidateReport {
            files: loaded.files,
            valid: loaded.manifests.len(),
            errors: loaded.errors,
        };
        report.errors.extend(index_errors);
        report.errors.sort_by(|a, b| a.package.cmp(&b.package));
        return Ok(report);
    }

    let validator = registry.validator();
    let mut report = ValidateReport::default();
    for path in paths {
        let file_path = if path.is_dir() {
            path.join(MANIFEST_FILE)
        } else {
            path.clone()
        };
        let checked = ManifestFile::read(&file_path).check(&validator);
        report.files += 1;
        if checked.is_valid() {
            report.valid += 1;
        }
        report.errors.extend(checked.errors);
    }
    Ok(report)
}
