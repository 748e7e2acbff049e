//! Resolution failures and the aggregated failure report.

use std::fmt;

use thiserror::Error;

use luma_core::{Constraint, PackageName};

use crate::graph::ResolvedNode;

/// A constraint placed on a package, and the chain of packages that placed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Root first; the last node is the direct requester. Empty for the
    /// constraint given on the command line.
    pub path: Vec<ResolvedNode>,
    pub constraint: Constraint,
}

impl Requirement {
    pub fn requester(&self) -> Option<&ResolvedNode> {
        self.path.last()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "root requires {}", self.constraint)
        } else {
            write!(f, "{} requires {}", join(&self.path), self.constraint)
        }
    }
}

/// A single reason resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// No published version of `package` satisfies `constraint`, or the
    /// package does not exist.
    #[error("{} requires {package} {constraint}, but {}", requester_label(.requester), .reason)]
    UnsatisfiableDependency {
        requester: Option<ResolvedNode>,
        package: PackageName,
        constraint: Constraint,
        reason: String,
    },

    /// Two paths place constraints on `package` that no single version meets.
    #[error("version conflict on {package}: {first}; {second}")]
    VersionConflict {
        package: PackageName,
        first: Requirement,
        second: Requirement,
    },

    /// A package depends on itself through `path`, which starts and ends
    /// with the same package.
    #[error("dependency cycle: {}", join(.path))]
    DependencyCycle { path: Vec<ResolvedNode> },
}

fn requester_label(requester: &Option<ResolvedNode>) -> String {
    match requester {
        Some(node) => node.to_string(),
        None => "root".to_string(),
    }
}

fn join(path: &[ResolvedNode]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Every failure found while resolving one root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub errors: Vec<ResolutionError>,
}

impl ResolutionFailure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: ResolutionError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "resolution failed ({} error(s)):", self.errors.len())?;
        for e in &self.errors {
            writeln!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ResolutionFailure {}
