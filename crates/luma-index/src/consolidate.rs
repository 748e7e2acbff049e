//! Consolidation of validated manifests into the global index.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use luma_core::{Category, Manifest, PackageName, Version};

use crate::diagnostics::{DiagnosticKind, ValidationError};

/// One package's row in the global index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Category of the latest version; decides which section the row lands in.
    #[serde(skip)]
    pub category: Category,
    pub latest: Version,
    /// Every published version, highest first.
    pub versions: Vec<Version>,
}

/// Read-only projection of a manifest set.
///
/// Only [`consolidate`] can build one, so an index always matches the
/// manifests it was computed from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalIndex {
    packages: BTreeMap<PackageName, IndexEntry>,
}

impl GlobalIndex {
    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.packages.get(name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// All rows, ordered by package name.
    pub fn iter(&self) -> impl Iterator<Item = (&PackageName, &IndexEntry)> {
        self.packages.iter()
    }

    pub fn by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = (&PackageName, &IndexEntry)> {
        self.packages
            .iter()
            .filter(move |(_, entry)| entry.category == category)
    }
}

/// Serialized as `{"<category>": {"<name>": {"latest", "versions"}}}`, with
/// a section for every category even when it is empty.
impl Serialize for GlobalIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections: BTreeMap<&str, BTreeMap<&str, &IndexEntry>> = Category::ALL
            .iter()
            .map(|category| {
                let rows = self
                    .by_category(*category)
                    .map(|(name, entry)| (name.as_str(), entry))
                    .collect();
                (category.as_str(), rows)
            })
            .collect();
        sections.serialize(serializer)
    }
}

/// Build the global index from a manifest set.
///
/// A name claimed by more than one manifest is reported and left out, as is
/// a manifest with no versions. Other packages are unaffected. Diagnostics
/// are ordered by package name.
pub fn consolidate(manifests: &[Manifest]) -> (GlobalIndex, Vec<ValidationError>) {
    let mut claims: BTreeMap<&PackageName, usize> = BTreeMap::new();
    for manifest in manifests {
        *claims.entry(manifest.name()).or_default() += 1;
    }

    let mut packages = BTreeMap::new();
    let mut errors = Vec::new();

    for (name, count) in &claims {
        if *count > 1 {
            errors.push(ValidationError::new(
                name.as_str(),
                None,
                "name",
                DiagnosticKind::DuplicatePackage,
                format!("claimed by {count} manifests"),
            ));
        }
    }

    for manifest in manifests {
        let name = manifest.name();
        if claims.get(name).copied().unwrap_or_default() > 1 {
            continue;
        }
        let Some(latest) = manifest.latest() else {
            errors.push(ValidationError::new(
                name.as_str(),
                None,
                "versions",
                DiagnosticKind::EmptyManifest,
                "manifest publishes no versions",
            ));
            continue;
        };

        let mut versions: Vec<Version> = manifest.versions().iter().map(|e| e.version).collect();
        versions.sort_unstable_by(|a, b| b.cmp(a));

        packages.insert(
            name.clone(),
            IndexEntry {
                category: latest.category,
                latest: latest.version,
                versions,
            },
        );
    }

    errors.sort_by(|a, b| a.package.cmp(&b.package));
    tracing::debug!(
        "consolidated {} package(s), {} diagnostic(s)",
        packages.len(),
        errors.len()
    );

    (GlobalIndex { packages }, errors)
}
