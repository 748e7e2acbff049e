//! Typed package manifests.
//!
//! A [`Manifest`] can only be built from already-valid parts; raw JSON
//! records are checked and converted by the validator in `luma-index`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::Category;
use crate::checksum::Checksum;
use crate::constraint::Constraint;
use crate::error::DuplicateVersionError;
use crate::name::PackageName;
use crate::version::Version;

/// One published version of a package.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionEntry {
    pub version: Version,
    #[serde(rename = "shasum")]
    pub checksum: Checksum,
    pub size: u64,
    pub url: String,
    pub dependencies: BTreeMap<PackageName, Constraint>,
    #[serde(rename = "engineVersion", skip_serializing_if = "Option::is_none")]
    pub engine: Option<Constraint>,
    pub category: Category,
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl VersionEntry {
    /// An entry with no dependencies, engine constraint or description.
    pub fn new(
        version: Version,
        checksum: Checksum,
        size: u64,
        url: impl Into<String>,
        category: Category,
        published: impl Into<String>,
    ) -> Self {
        Self {
            version,
            checksum,
            size,
            url: url.into(),
            dependencies: BTreeMap::new(),
            engine: None,
            category,
            published: published.into(),
            description: None,
        }
    }

    pub fn with_dependency(mut self, name: PackageName, constraint: Constraint) -> Self {
        self.dependencies.insert(name, constraint);
        self
    }
}

/// Every published version of one package, most recent first.
///
/// Version values are unique within a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    name: PackageName,
    versions: Vec<VersionEntry>,
}

impl Manifest {
    /// A manifest with no published versions yet.
    pub fn new(name: PackageName) -> Self {
        Self {
            name,
            versions: Vec::new(),
        }
    }

    /// Build a manifest from entries in recency order, rejecting repeated versions.
    pub fn from_entries(
        name: PackageName,
        entries: impl IntoIterator<Item = VersionEntry>,
    ) -> Result<Self, DuplicateVersionError> {
        let mut manifest = Self::new(name);
        for entry in entries {
            manifest.check_unpublished(&entry.version)?;
            manifest.versions.push(entry);
        }
        Ok(manifest)
    }

    /// Publish a new version as the most recent entry.
    ///
    /// Republishing an existing version is rejected; published entries are
    /// never overwritten.
    pub fn publish(&mut self, entry: VersionEntry) -> Result<(), DuplicateVersionError> {
        self.check_unpublished(&entry.version)?;
        tracing::debug!("publishing {}@{}", self.name, entry.version);
        self.versions.insert(0, entry);
        Ok(())
    }

    fn check_unpublished(&self, version: &Version) -> Result<(), DuplicateVersionError> {
        if self.get(version).is_some() {
            return Err(DuplicateVersionError {
                package: self.name.to_string(),
                version: version.to_string(),
            });
        }
        Ok(())
    }

    pub fn name(&self) -> &PackageName {
        &self.name
    }

    /// Entries in recency order (most recent first).
    pub fn versions(&self) -> &[VersionEntry] {
        &self.versions
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn get(&self, version: &Version) -> Option<&VersionEntry> {
        self.versions.iter().find(|e| &e.version == version)
    }

    /// The entry with the highest version, regardless of publication order.
    pub fn latest(&self) -> Option<&VersionEntry> {
        self.versions.iter().max_by_key(|e| e.version)
    }

    /// The highest entry whose version satisfies `constraint`.
    pub fn best_match(&self, constraint: &Constraint) -> Option<&VersionEntry> {
        self.versions
            .iter()
            .filter(|e| constraint.satisfies(&e.version))
            .max_by_key(|e| e.version)
    }
}
