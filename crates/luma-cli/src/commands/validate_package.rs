use std::path::Path;

use miette::Result;

use luma_ops::ops_validate_package;
use luma_util::errors::LumaError;
use luma_util::output::{status, StatusKind};

pub fn exec(path: &Path) -> Result<()> {
    let errors = ops_validate_package::validate_package(path)?;
    if errors.is_empty() {
        status(StatusKind::Action, "Validated", &path.display().to_string());
        return Ok(());
    }
    super::print_diagnostics(&errors);
    Err(LumaError::Manifest {
        message: format!("{} problem(s) in {}", errors.len(), path.display()),
    }
    .into())
}
