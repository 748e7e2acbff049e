//! Core data types for the Luma package registry.
//!
//! This crate defines the vocabulary shared by the validator, the index
//! consolidator and the resolver: reverse-domain package names, strict
//! `MAJOR.MINOR.PATCH` versions, constraint expressions, the category
//! table, checksums, and the typed manifest model.
//!
//! Apart from loading `luma.toml`, this crate performs no I/O.

pub mod category;
pub mod checksum;
pub mod config;
pub mod constraint;
pub mod error;
pub mod manifest;
pub mod name;
pub mod version;

pub use category::Category;
pub use checksum::{Checksum, ChecksumVerifier, Sha256Verifier};
pub use constraint::{Comparator, Constraint, Op};
pub use error::{DuplicateVersionError, ParseError};
pub use manifest::{Manifest, VersionEntry};
pub use name::PackageName;
pub use version::Version;
