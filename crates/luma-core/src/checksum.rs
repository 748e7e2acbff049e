//! Archive checksums and the verification seam.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ParseError;

/// A SHA-256 digest: exactly 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Checksum {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if luma_util::hash::is_sha256_hex(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseError::Checksum {
                input: s.to_string(),
                reason: "must be 64 lowercase hexadecimal characters".to_string(),
            })
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Checksum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Computes digests of archives for comparison against published checksums.
pub trait ChecksumVerifier {
    /// Lowercase hex digest of the file at `path`.
    fn digest_file(&self, path: &Path) -> std::io::Result<String>;
}

/// SHA-256, the only algorithm registry manifests publish.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Verifier;

impl ChecksumVerifier for Sha256Verifier {
    fn digest_file(&self, path: &Path) -> std::io::Result<String> {
        luma_util::hash::sha256_file(path)
    }
}
