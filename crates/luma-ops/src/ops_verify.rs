//! Operation: check a local archive against its published checksum and size.

use std::path::Path;

use luma_core::{ChecksumVerifier, PackageName, Sha256Verifier, Version};
use luma_util::errors::LumaError;

use crate::registry::Registry;

/// A successfully verified archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub package: PackageName,
    pub version: Version,
    pub digest: String,
    pub size: u64,
}

pub fn verify(
    registry: &Registry,
    archive: &Path,
    package: &str,
    version: &str,
) -> miette::Result<VerifyOutcome> {
    let package = PackageName::parse(package).map_err(|e| LumaError::Generic {
        message: e.to_string(),
    })?;
    let version = Version::parse(version).map_err(|e| LumaError::Generic {
        message: e.to_string(),
    })?;

    let loaded = registry.load()?;
    let manifest = loaded
        .manifests
        .iter()
        .find(|m| m.name() == &package)
        .ok_or_else(|| LumaError::Manifest {
            message: format!("no valid manifest for {package}"),
        })?;
    let entry = manifest.get(&version).ok_or_else(|| LumaError::Manifest {
        message: format!("{package} has no published version {version}"),
    })?;

    let size = std::fs::metadata(archive).map_err(LumaError::Io)?.len();
    if size != entry.size {
        return Err(LumaError::Checksum {
            message: format!(
                "size mismatch for {package}@{version}: expected {} bytes, found {size} in {}",
                entry.size,
                archive.display()
            ),
        }
        .into());
    }

    let digest = Sha256Verifier
        .digest_file(archive)
        .map_err(LumaError::Io)?;
    if digest != entry.checksum.as_str() {
        return Err(LumaError::Checksum {
            message: format!(
                "checksum mismatch for {package}@{version}: expected {}, found {digest} in {}",
                entry.checksum,
                archive.display()
            ),
        }
        .into());
    }

    tracing::debug!("verified {} as {package}@{version}", archive.display());
    Ok(VerifyOutcome {
        package,
        version,
        digest,
        size,
    })
}
