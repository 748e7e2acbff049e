//! Dependency resolution engine: depth-first traversal with newest-satisfying
//! version selection, diamond resolution by constraint intersection, and
//! structural cycle detection.

pub mod conflict;
pub mod graph;
pub mod resolver;
pub mod visited;

pub use conflict::{Requirement, ResolutionError, ResolutionFailure};
pub use graph::{DepEdge, DependencyGraph, ResolvedNode};
pub use resolver::{resolve, ResolutionPlan, Resolver};
