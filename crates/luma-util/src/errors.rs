use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Luma operations.
#[derive(Debug, Error, Diagnostic)]
pub enum LumaError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A manifest file could not be read, parsed or validated.
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Run `luma validate` to list every defect in the registry manifests"))]
    Manifest { message: String },

    /// The global index could not be built or persisted.
    #[error("Index error: {message}")]
    Index { message: String },

    /// Dependency resolution failed (unsatisfiable constraints, conflicts, cycles).
    #[error("Dependency resolution failed: {message}")]
    Resolution { message: String },

    /// An archive did not match its published checksum or size.
    #[error("Checksum error: {message}")]
    Checksum { message: String },

    /// Invalid `luma.toml` configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check luma.toml at the registry root for syntax errors"))]
    Config { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type LumaResult<T> = miette::Result<T>;
