//! Registry operations behind the `luma` commands.
//!
//! Each `ops_*` module loads what it needs through [`registry::Registry`],
//! runs the core stage, and returns a result for the caller to render.

pub mod ops_index;
pub mod ops_resolve;
pub mod ops_validate;
pub mod ops_validate_package;
pub mod ops_verify;
pub mod registry;
pub mod source;

pub use registry::{LoadedRegistry, Registry};
pub use source::{DirectorySource, ManifestFile, ManifestSource};
