//! Structured diagnostics shared by the validator and the consolidator.

use std::fmt;

use serde::Serialize;

/// What kind of defect a diagnostic reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Malformed version, constraint or package name string.
    Parse,
    /// Missing or mistyped field, or a value outside its allowed set.
    Schema,
    /// A version appears twice in one manifest.
    DuplicateVersion,
    /// Checksum is not 64 lowercase hex characters.
    ChecksumFormat,
    /// Two manifests claim the same package name.
    DuplicatePackage,
    /// A manifest publishes no versions.
    EmptyManifest,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiagnosticKind::Parse => "parse error",
            DiagnosticKind::Schema => "schema error",
            DiagnosticKind::DuplicateVersion => "duplicate version",
            DiagnosticKind::ChecksumFormat => "checksum format",
            DiagnosticKind::DuplicatePackage => "duplicate package",
            DiagnosticKind::EmptyManifest => "empty manifest",
        };
        f.write_str(s)
    }
}

/// One defect, located by package, version (when known) and field path.
///
/// `package` and `version` hold the raw text from the input, since either
/// may itself be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub package: String,
    pub version: Option<String>,
    pub field: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(
        package: impl Into<String>,
        version: Option<String>,
        field: impl Into<String>,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            version,
            field: field.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(v) => write!(f, "{}@{}", self.package, v)?,
            None => write!(f, "{}", self.package)?,
        }
        write!(f, ": {}: {} ({})", self.field, self.message, self.kind)
    }
}

impl std::error::Error for ValidationError {}
