//! Version constraint expressions.
//!
//! A constraint is a whitespace-separated conjunction of atoms, each an
//! optional operator followed by a version:
//!
//! - `=`, `>=`, `<=`, `>`, `<` compare directly; a bare version means `=`.
//! - `^X.Y.Z` means `>=X.Y.Z <(X+1).0.0`, including when `X` is zero.
//! - `~X.Y.Z` means `>=X.Y.Z <X.(Y+1).0`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseError;
use crate::version::Version;

/// Comparison operator of a single constraint atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Exact,
    Greater,
    GreaterEq,
    Less,
    LessEq,
    Caret,
    Tilde,
}

impl Op {
    /// Two-character operators come first so `>=` is not read as `>`.
    const PREFIXES: [(&'static str, Op); 7] = [
        (">=", Op::GreaterEq),
        ("<=", Op::LessEq),
        (">", Op::Greater),
        ("<", Op::Less),
        ("=", Op::Exact),
        ("^", Op::Caret),
        ("~", Op::Tilde),
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Exact => "=",
            Op::Greater => ">",
            Op::GreaterEq => ">=",
            Op::Less => "<",
            Op::LessEq => "<=",
            Op::Caret => "^",
            Op::Tilde => "~",
        }
    }
}

/// One atom of a constraint: an operator applied to a base version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Comparator {
    pub op: Op,
    pub version: Version,
}

impl Comparator {
    pub const fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    /// Rewrite `^` and `~` into their primitive lower/upper bound pair.
    ///
    /// Bounds are computed from the base version only. An upper bound that
    /// would overflow is dropped, leaving the range open above.
    pub fn expand(&self) -> Vec<Comparator> {
        let base = self.version;
        let upper = match self.op {
            Op::Caret => base.next_major(),
            Op::Tilde => base.next_minor(),
            _ => return vec![*self],
        };
        let mut out = vec![Comparator::new(Op::GreaterEq, base)];
        if let Some(upper) = upper {
            out.push(Comparator::new(Op::Less, upper));
        }
        out
    }

    /// Test a primitive (already expanded) comparator.
    fn matches_primitive(&self, v: &Version) -> bool {
        let base = &self.version;
        match self.op {
            Op::Exact => v == base,
            Op::Greater => v > base,
            Op::GreaterEq => v >= base,
            Op::Less => v < base,
            Op::LessEq => v <= base,
            Op::Caret | Op::Tilde => self.expand().iter().all(|c| c.matches_primitive(v)),
        }
    }

    pub fn matches(&self, v: &Version) -> bool {
        self.expand().iter().all(|c| c.matches_primitive(v))
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.version)
    }
}

/// A conjunction of comparators; a version satisfies it when every atom holds.
///
/// `Display` reproduces the source text with whitespace normalised, so a
/// bare `1.0.0` prints as written rather than as `=1.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    comparators: Vec<Comparator>,
    source: String,
}

impl Constraint {
    /// Parse a constraint expression. Equivalent to `s.parse::<Constraint>()`.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        s.parse()
    }

    /// A constraint every version satisfies (`>=0.0.0`).
    pub fn any() -> Self {
        Self::from_comparators(vec![Comparator::new(Op::GreaterEq, Version::new(0, 0, 0))])
    }

    fn from_comparators(comparators: Vec<Comparator>) -> Self {
        let source = comparators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            comparators,
            source,
        }
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    /// True if `version` satisfies every atom.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }

    /// The conjunction of `self` and `other`.
    pub fn intersect(&self, other: &Constraint) -> Constraint {
        let mut comparators = self.comparators.clone();
        comparators.extend_from_slice(&other.comparators);
        Constraint {
            comparators,
            source: format!("{} {}", self.source, other.source),
        }
    }

    /// The highest version in `candidates` that satisfies this constraint.
    pub fn best_match<'a, I>(&self, candidates: I) -> Option<&'a Version>
    where
        I: IntoIterator<Item = &'a Version>,
    {
        candidates
            .into_iter()
            .filter(|v| self.satisfies(v))
            .max()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Constraint {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let atoms: Vec<&str> = s.split_whitespace().collect();
        if atoms.is_empty() {
            return Err(ParseError::Constraint {
                input: s.to_string(),
                atom: String::new(),
                reason: "is missing: constraint is empty".to_string(),
            });
        }

        let comparators = atoms
            .iter()
            .map(|atom| parse_atom(atom))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|(atom, reason)| ParseError::Constraint {
                input: s.to_string(),
                atom,
                reason,
            })?;

        Ok(Self {
            comparators,
            source: atoms.join(" "),
        })
    }
}

fn parse_atom(atom: &str) -> Result<Comparator, (String, String)> {
    let (op, rest) = Op::PREFIXES
        .iter()
        .find_map(|(prefix, op)| atom.strip_prefix(prefix).map(|rest| (*op, rest)))
        .unwrap_or((Op::Exact, atom));

    let version = rest
        .parse::<Version>()
        .map_err(|e| (atom.to_string(), format!("has a bad version: {}", e.reason())))?;
    Ok(Comparator::new(op, version))
}

impl Serialize for Constraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Constraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
