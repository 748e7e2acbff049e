use std::path::Path;

use miette::Result;

use luma_ops::ops_verify;
use luma_util::output::{status, StatusKind};

pub fn exec(registry: Option<&Path>, archive: &Path, package: &str, version: &str) -> Result<()> {
    let registry = super::open_registry(registry)?;
    let outcome = ops_verify::verify(&registry, archive, package, version)?;
    status(
        StatusKind::Action,
        "Verified",
        &format!(
            "{}@{} ({} bytes, sha256 {})",
            outcome.package, outcome.version, outcome.size, outcome.digest
        ),
    );
    Ok(())
}
