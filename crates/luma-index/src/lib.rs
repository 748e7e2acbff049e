//! Manifest validation and global index consolidation.
//!
//! Both stages aggregate: a single run reports every defect it finds
//! instead of stopping at the first one.

pub mod consolidate;
pub mod descriptor;
pub mod diagnostics;
pub mod validator;

pub use consolidate::{consolidate, GlobalIndex, IndexEntry};
pub use descriptor::validate_descriptor;
pub use diagnostics::{DiagnosticKind, ValidationError};
pub use validator::{Checked, Validator};
