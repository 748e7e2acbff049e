//! Reverse-domain package names (`com.nexel.ui`).

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A package identity: lowercase alphanumeric segments joined by dots, at
/// least two segments.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the name begins with `prefix` (e.g. `com.nexel.`).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

/// Check `s` against `^[a-z0-9]+(\.[a-z0-9]+)+$`.
pub fn check_name(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("name is empty");
    }
    let segments: Vec<&str> = s.split('.').collect();
    if segments.len() < 2 {
        return Err("must follow reverse-domain notation with at least two segments");
    }
    if segments.iter().any(|seg| seg.is_empty()) {
        return Err("segments must not be empty");
    }
    if !segments
        .iter()
        .all(|seg| seg.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()))
    {
        return Err("segments may only contain lowercase letters and digits");
    }
    Ok(())
}

impl FromStr for PackageName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_name(s).map_err(|reason| ParseError::PackageName {
            input: s.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PackageName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PackageName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
