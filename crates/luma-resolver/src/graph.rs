//! Resolved dependency graph and its traversals.

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use luma_core::{Constraint, PackageName, Version};

/// One selected (package, version) pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResolvedNode {
    pub name: PackageName,
    pub version: Version,
}

impl ResolvedNode {
    pub fn new(name: PackageName, version: Version) -> Self {
        Self { name, version }
    }
}

impl fmt::Display for ResolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Edge label: the constraint the dependent declared.
#[derive(Debug, Clone)]
pub struct DepEdge {
    pub constraint: Constraint,
}

/// A resolved dependency graph backed by petgraph, holding at most one node
/// per package name.
#[derive(Debug)]
pub struct DependencyGraph {
    graph: DiGraph<ResolvedNode, DepEdge>,
    index: HashMap<PackageName, NodeIndex>,
    pub root: Option<NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            index: HashMap::new(),
            root: None,
        }
    }

    /// Add a node, or return the existing index for that package name.
    pub fn add_node(&mut self, node: ResolvedNode) -> NodeIndex {
        if let Some(&idx) = self.index.get(&node.name) {
            return idx;
        }
        let name = node.name.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(name, idx);
        idx
    }

    pub fn set_root(&mut self, idx: NodeIndex) {
        self.root = Some(idx);
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, edge: DepEdge) {
        if !self.graph.edges(from).any(|e| e.target() == to) {
            self.graph.add_edge(from, to, edge);
        }
    }

    pub fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ResolvedNode {
        &self.graph[idx]
    }

    /// Direct dependencies of a node, sorted by package name.
    pub fn dependencies_of(&self, idx: NodeIndex) -> Vec<(NodeIndex, &DepEdge)> {
        let mut out: Vec<(NodeIndex, &DepEdge)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.target(), e.weight()))
            .collect();
        out.sort_by(|a, b| self.graph[a.0].name.cmp(&self.graph[b.0].name));
        out
    }

    /// Every node with dependencies ahead of their dependents.
    ///
    /// Returns the node that closes a cycle if the graph is not acyclic.
    pub fn install_order(&self) -> Result<Vec<&ResolvedNode>, &ResolvedNode> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order.into_iter().rev().map(|idx| &self.graph[idx]).collect()),
            Err(cycle) => Err(&self.graph[cycle.node_id()]),
        }
    }

    /// Render the tree below the root, one node per line.
    ///
    /// Shared subtrees are printed in full under each dependent.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = String::new();
        let Some(root) = self.root else {
            return output;
        };
        output.push_str(&format!("{}\n", self.graph[root]));

        let mut visited = HashSet::new();
        visited.insert(root);
        let deps = self.dependencies_of(root);
        let count = deps.len();
        for (i, (idx, edge)) in deps.into_iter().enumerate() {
            let is_last = i + 1 == count;
            self.print_subtree(&mut output, idx, edge, "", is_last, 1, max_depth, &mut visited);
        }
        output
    }

    #[allow(clippy::too_many_arguments)]
    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeIndex,
        edge: &DepEdge,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<NodeIndex>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        output.push_str(&format!("{prefix}{connector}{node} ({})\n", edge.constraint));

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }
        if !visited.insert(idx) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let deps = self.dependencies_of(idx);
        let count = deps.len();
        for (i, (child, child_edge)) in deps.into_iter().enumerate() {
            self.print_subtree(
                output,
                child,
                child_edge,
                &child_prefix,
                i + 1 == count,
                depth + 1,
                max_depth,
                visited,
            );
        }
        visited.remove(&idx);
    }

    /// Path from the root to a package, root first.
    ///
    /// Accepts a full package name, or just its last segment when that is
    /// unambiguous.
    pub fn find_path(&self, key: &str) -> Option<Vec<&ResolvedNode>> {
        let root = self.root?;
        let target = self.resolve_key(key)?;
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        if self.dfs_path(root, target, &mut path, &mut visited) {
            Some(path.into_iter().map(|idx| &self.graph[idx]).collect())
        } else {
            None
        }
    }

    fn resolve_key(&self, key: &str) -> Option<NodeIndex> {
        if let Some(idx) = self.find(key) {
            return Some(idx);
        }
        let mut matches = self
            .index
            .iter()
            .filter(|(name, _)| name.as_str().rsplit('.').next() == Some(key));
        match (matches.next(), matches.next()) {
            (Some((_, &idx)), None) => Some(idx),
            _ => None,
        }
    }

    fn dfs_path(
        &self,
        current: NodeIndex,
        target: NodeIndex,
        path: &mut Vec<NodeIndex>,
        visited: &mut HashSet<NodeIndex>,
    ) -> bool {
        path.push(current);
        if current == target {
            return true;
        }
        if visited.insert(current) {
            for (child, _) in self.dependencies_of(current) {
                if self.dfs_path(child, target, path, visited) {
                    return true;
                }
            }
        }
        path.pop();
        false
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
