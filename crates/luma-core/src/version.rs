//! Strict `MAJOR.MINOR.PATCH` versions.
//!
//! Registry versions carry no pre-release or build metadata. Ordering is
//! numeric and field-by-field, so `10.0.0 > 2.0.0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;

/// A published package version.
///
/// The derived ordering compares `major`, then `minor`, then `patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a version string. Equivalent to `s.parse::<Version>()`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    /// `(major + 1).0.0`, or `None` on overflow.
    pub fn next_major(&self) -> Option<Self> {
        self.major.checked_add(1).map(|m| Self::new(m, 0, 0))
    }

    /// `major.(minor + 1).0`, or `None` on overflow.
    pub fn next_minor(&self) -> Option<Self> {
        self.minor
            .checked_add(1)
            .map(|m| Self::new(self.major, m, 0))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: &str| ParseError::Version {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(err("expected exactly three dot-separated components"));
        }

        let mut fields = [0u64; 3];
        for (slot, part) in fields.iter_mut().zip(&parts) {
            *slot = parse_component(part).map_err(|reason| err(reason))?;
        }

        Ok(Self::new(fields[0], fields[1], fields[2]))
    }
}

fn parse_component(part: &str) -> Result<u64, &'static str> {
    if part.is_empty() {
        return Err("empty component");
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err("components must be non-negative integers");
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err("components must not have leading zeros");
    }
    part.parse::<u64>().map_err(|_| "component out of range")
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
