//! Operation: rebuild `index.json` from the manifests tree.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use luma_index::{consolidate, ValidationError};
use luma_util::errors::LumaError;

use crate::registry::Registry;

/// The on-disk global index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocument {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub registry: String,
    pub revision: u64,
    pub packages: Value,
}

impl IndexDocument {
    /// Pretty-printed JSON with a trailing newline, as written to disk.
    pub fn render(&self) -> miette::Result<String> {
        let mut text = serde_json::to_string_pretty(self).map_err(|e| LumaError::Index {
            message: format!("failed to serialize index: {e}"),
        })?;
        text.push('\n');
        Ok(text)
    }
}

/// Outcome of `luma index`.
#[derive(Debug)]
pub struct IndexOutcome {
    pub path: PathBuf,
    pub revision: u64,
    /// Packages listed in the index.
    pub packages: usize,
    /// The file on disk already matched the computed index.
    pub up_to_date: bool,
    pub written: bool,
    /// Manifests left out of the index, and why.
    pub errors: Vec<ValidationError>,
}

/// Revision for a freshly computed `packages` section.
///
/// Unchanged packages keep the previous revision; changed ones bump it. A
/// missing index, or one whose revision isn't an integer, starts at 1.
pub fn next_revision(previous: Option<&Value>, packages: &Value) -> u64 {
    let Some(previous) = previous else {
        return 1;
    };
    match previous.get("revision").and_then(Value::as_u64) {
        Some(rev) if previous.get("packages") == Some(packages) => rev,
        Some(rev) => rev.saturating_add(1),
        None => 1,
    }
}

/// Consolidate every valid manifest and write the index, unless `check` is
/// set, in which case only compare against what is on disk.
pub fn index(registry: &Registry, check: bool) -> miette::Result<IndexOutcome> {
    let loaded = registry.load()?;
    let (global, index_errors) = consolidate(&loaded.manifests);
    let mut errors = loaded.errors;
    errors.extend(index_errors);

    let packages = serde_json::to_value(&global).map_err(|e| LumaError::Index {
        message: format!("failed to serialize packages: {e}"),
    })?;

    let path = registry.index_path();
    let existing = read_existing(&path)?;
    let previous: Option<Value> = existing.as_deref().and_then(|text| {
        serde_json::from_str(text)
            .map_err(|e| tracing::warn!("ignoring unreadable {}: {e}", path.display()))
            .ok()
    });

    let config = registry.config();
    let document = IndexDocument {
        schema: config.registry.schema.clone(),
        registry: config.registry.name.clone(),
        revision: next_revision(previous.as_ref(), &packages),
        packages,
    };
    let rendered = document.render()?;
    let up_to_date = existing.as_deref() == Some(rendered.as_str());

    let written = !check && !up_to_date;
    if written {
        luma_util::fs::write_atomic(&path, rendered.as_bytes()).map_err(|e| LumaError::Index {
            message: format!("failed to write {}: {e}", path.display()),
        })?;
    }

    Ok(IndexOutcome {
        path,
        revision: document.revision,
        packages: global.len(),
        up_to_date,
        written,
        errors,
    })
}

fn read_existing(path: &Path) -> miette::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LumaError::Io(e).into()),
    }
}
