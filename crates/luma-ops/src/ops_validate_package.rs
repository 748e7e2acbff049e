//! Operation: validate an author-side `package.json`.

use std::path::Path;

use serde_json::Value;

use luma_index::{validate_descriptor, ValidationError};
use luma_util::errors::LumaError;

pub const DESCRIPTOR_FILE: &str = "package.json";

/// Check a descriptor file, or the `package.json` inside a directory.
///
/// Unreadable or malformed JSON is an error; schema problems are returned as
/// diagnostics.
pub fn validate_package(path: &Path) -> miette::Result<Vec<ValidationError>> {
    let path = if path.is_dir() {
        path.join(DESCRIPTOR_FILE)
    } else {
        path.to_path_buf()
    };
    let text = std::fs::read_to_string(&path).map_err(|e| LumaError::Manifest {
        message: format!("failed to read {}: {e}", path.display()),
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| LumaError::Manifest {
        message: format!("invalid JSON in {}: {e}", path.display()),
    })?;
    Ok(validate_descriptor(&value))
}
