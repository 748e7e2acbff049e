//! Parse and publish errors for core registry types.

use thiserror::Error;

/// A malformed version, constraint, package name or checksum string.
///
/// Always recoverable; each variant carries the offending text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid version '{input}': {reason}")]
    Version { input: String, reason: String },

    #[error("invalid constraint '{input}': atom '{atom}' {reason}")]
    Constraint {
        input: String,
        atom: String,
        reason: String,
    },

    #[error("invalid package name '{input}': {reason}")]
    PackageName { input: String, reason: String },

    #[error("invalid checksum '{input}': {reason}")]
    Checksum { input: String, reason: String },
}

impl ParseError {
    /// The substring that failed to parse.
    pub fn offending(&self) -> &str {
        match self {
            ParseError::Version { input, .. }
            | ParseError::PackageName { input, .. }
            | ParseError::Checksum { input, .. } => input,
            ParseError::Constraint { atom, .. } => atom,
        }
    }

    /// Human-readable reason, without the offending input.
    pub fn reason(&self) -> &str {
        match self {
            ParseError::Version { reason, .. }
            | ParseError::Constraint { reason, .. }
            | ParseError::PackageName { reason, .. }
            | ParseError::Checksum { reason, .. } => reason,
        }
    }
}

/// Attempt to publish a version that already exists in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("version {version} of '{package}' is already published")]
pub struct DuplicateVersionError {
    pub package: String,
    pub version: String,
}
