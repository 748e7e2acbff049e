//! Shared utilities for the Luma package registry.
//!
//! This crate provides cross-cutting concerns used by all other Luma crates:
//! the top-level error type, SHA-256 hashing, filesystem helpers and
//! terminal status lines.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod output;
