use std::path::{Path, PathBuf};

use miette::Result;

use luma_ops::ops_validate;
use luma_util::errors::LumaError;
use luma_util::output::{status, StatusKind};

pub fn exec(registry: Option<&Path>, paths: &[PathBuf]) -> Result<()> {
    let registry = super::open_registry(registry)?;
    let report = ops_validate::validate(&registry, paths)?;

    if report.is_clean() {
        status(
            StatusKind::Action,
            "Validated",
            &format!("{} manifest(s)", report.files),
        );
        return Ok(());
    }

    super::print_diagnostics(&report.errors);
    Err(LumaError::Manifest {
        message: format!(
            "{} problem(s) found; {} of {} manifest(s) valid",
            report.errors.len(),
            report.valid,
            report.files
        ),
    }
    .into())
}
