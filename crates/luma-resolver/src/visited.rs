//! Per-pass bookkeeping of expanded nodes.

use std::collections::HashSet;

use luma_core::{PackageName, Version};

/// Tracks which (package, version) pairs have had their dependencies expanded
/// in the current pass, so shared subtrees are walked once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    visited: HashSet<(PackageName, Version)>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a pair as visited. Returns `false` if it already was.
    pub fn visit(&mut self, name: &PackageName, version: Version) -> bool {
        self.visited.insert((name.clone(), version))
    }
}
