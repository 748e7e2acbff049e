//! Core resolution algorithm.
//!
//! Each pass walks the dependency graph depth-first from the root, selecting
//! one version per package: a pinned version if one exists, else the version
//! already selected earlier in the pass, else the newest version satisfying
//! the first constraint seen. After the pass, every reached package gets a
//! fresh pin: the newest version meeting all requirements recorded for it in
//! that pass. Resolution settles once each package already sits at its pin.
//! When no version meets all requirements, the package is reported as a
//! version conflict.

use std::collections::BTreeMap;

use luma_core::{Constraint, Manifest, PackageName, Version, VersionEntry};
use petgraph::graph::NodeIndex;

use crate::conflict::{Requirement, ResolutionError, ResolutionFailure};
use crate::graph::{DepEdge, DependencyGraph, ResolvedNode};
use crate::visited::VisitedSet;

/// A successful resolution.
#[derive(Debug)]
pub struct ResolutionPlan {
    root: ResolvedNode,
    packages: Vec<ResolvedNode>,
    graph: DependencyGraph,
}

impl ResolutionPlan {
    pub fn root(&self) -> &ResolvedNode {
        &self.root
    }

    /// Every selected (package, version) pair, root included, with
    /// dependencies before their dependents.
    pub fn packages(&self) -> &[ResolvedNode] {
        &self.packages
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn version_of(&self, name: &str) -> Option<Version> {
        self.packages
            .iter()
            .find(|n| n.name.as_str() == name)
            .map(|n| n.version)
    }
}

/// Resolve `root` against a manifest set. See [`Resolver::resolve`].
pub fn resolve(
    root: &PackageName,
    constraint: &Constraint,
    manifests: &[Manifest],
) -> Result<ResolutionPlan, ResolutionFailure> {
    Resolver::new(manifests).resolve(root, constraint)
}

/// Read-only view over a manifest set, reusable across resolutions.
#[derive(Debug)]
pub struct Resolver<'m> {
    manifests: BTreeMap<&'m PackageName, &'m Manifest>,
}

impl<'m> Resolver<'m> {
    /// When a name appears in more than one manifest, the first one is used.
    pub fn new(manifests: &'m [Manifest]) -> Self {
        let mut map = BTreeMap::new();
        for manifest in manifests {
            if map.contains_key(manifest.name()) {
                tracing::warn!("ignoring duplicate manifest for {}", manifest.name());
                continue;
            }
            map.insert(manifest.name(), manifest);
        }
        Self { manifests: map }
    }

    /// Compute an install plan for the newest version of `root` satisfying
    /// `constraint`.
    ///
    /// Failures are aggregated: every unsatisfiable edge, cycle and conflict
    /// found in the final pass is reported together.
    pub fn resolve(
        &self,
        root: &PackageName,
        constraint: &Constraint,
    ) -> Result<ResolutionPlan, ResolutionFailure> {
        let max_passes = self
            .manifests
            .values()
            .map(|m| m.versions().len())
            .sum::<usize>()
            + 1;
        let mut pins: BTreeMap<PackageName, Version> = BTreeMap::new();

        for pass_no in 1..=max_passes {
            let pass = Pass::run(self, &pins, root, constraint);
            let (next, conflicts) = self.settle(&pass);
            let settled = next
                .iter()
                .all(|(name, version)| pass.chosen.get(name) == Some(version));
            if settled {
                return pass.finish(conflicts);
            }
            tracing::debug!("pass {pass_no}: repinning {} package(s)", next.len());
            drop(pass);
            pins = next;
        }

        // Pins kept moving without settling; report what the last attempt saw.
        let pass = Pass::run(self, &pins, root, constraint);
        let (_, conflicts) = self.settle(&pass);
        pass.finish(conflicts)
    }

    /// Pin every package reached in `pass` to the newest version meeting all
    /// of its live requirements, or report a conflict when none does.
    ///
    /// Pins are rebuilt from scratch each pass, so a pin whose requirement
    /// disappeared (its requester was itself repinned) is released.
    fn settle(&self, pass: &Pass<'_, 'm>) -> (BTreeMap<PackageName, Version>, Vec<ResolutionError>) {
        let mut pins = BTreeMap::new();
        let mut conflicts = Vec::new();
        for (name, reqs) in &pass.requirements {
            let Some(manifest) = self.manifests.get(name) else {
                continue;
            };
            let live: Vec<&Requirement> = reqs
                .iter()
                .filter(|r| manifest.best_match(&r.constraint).is_some())
                .collect();
            if live.is_empty() {
                continue;
            }
            match combined_match(manifest, &live) {
                Some(version) => {
                    pins.insert(name.clone(), version);
                }
                None => conflicts.push(conflict(name, manifest, &live)),
            }
        }
        (pins, conflicts)
    }
}

/// Newest version of `manifest` meeting every requirement.
fn combined_match(manifest: &Manifest, reqs: &[&Requirement]) -> Option<Version> {
    let mut iter = reqs.iter();
    let first = iter.next()?.constraint.clone();
    let all = iter.fold(first, |acc, r| acc.intersect(&r.constraint));
    manifest.best_match(&all).map(|e| e.version)
}

/// Name the first pair of requirements that cannot be met together.
fn conflict(name: &PackageName, manifest: &Manifest, reqs: &[&Requirement]) -> ResolutionError {
    let pair = (0..reqs.len())
        .flat_map(|i| (i + 1..reqs.len()).map(move |j| (i, j)))
        .find(|&(i, j)| combined_match(manifest, &[reqs[i], reqs[j]]).is_none())
        .unwrap_or((0, reqs.len().saturating_sub(1)));

    let pick = |i: usize| {
        reqs.get(i).map(|r| (*r).clone()).unwrap_or(Requirement {
            path: Vec::new(),
            constraint: Constraint::any(),
        })
    };
    ResolutionError::VersionConflict {
        package: name.clone(),
        first: pick(pair.0),
        second: pick(pair.1),
    }
}

/// State of one depth-first walk.
struct Pass<'r, 'm> {
    resolver: &'r Resolver<'m>,
    pins: &'r BTreeMap<PackageName, Version>,
    chosen: BTreeMap<PackageName, Version>,
    requirements: BTreeMap<PackageName, Vec<Requirement>>,
    graph: DependencyGraph,
    path: Vec<ResolvedNode>,
    visited: VisitedSet,
    errors: Vec<ResolutionError>,
}

impl<'r, 'm> Pass<'r, 'm> {
    fn run(
        resolver: &'r Resolver<'m>,
        pins: &'r BTreeMap<PackageName, Version>,
        root: &PackageName,
        constraint: &Constraint,
    ) -> Self {
        let mut pass = Pass {
            resolver,
            pins,
            chosen: BTreeMap::new(),
            requirements: BTreeMap::new(),
            graph: DependencyGraph::new(),
            path: Vec::new(),
            visited: VisitedSet::new(),
            errors: Vec::new(),
        };

        pass.requirements.insert(
            root.clone(),
            vec![Requirement {
                path: Vec::new(),
                constraint: constraint.clone(),
            }],
        );
        if let Some((node, entry)) = pass.select(None, root, constraint) {
            let idx = pass.graph.add_node(node.clone());
            pass.graph.set_root(idx);
            pass.visit(node, entry);
        }
        pass
    }

    /// Pick a version of `name` for an edge, or record why none exists.
    fn select(
        &mut self,
        requester: Option<&ResolvedNode>,
        name: &PackageName,
        constraint: &Constraint,
    ) -> Option<(ResolvedNode, &'m VersionEntry)> {
        let resolver = self.resolver;
        let unsatisfiable = |reason: String| ResolutionError::UnsatisfiableDependency {
            requester: requester.cloned(),
            package: name.clone(),
            constraint: constraint.clone(),
            reason,
        };

        let Some(manifest) = resolver.manifests.get(name).copied() else {
            self.errors
                .push(unsatisfiable("no such package is published".to_string()));
            return None;
        };
        let Some(best) = manifest.best_match(constraint) else {
            let reason = match manifest.latest() {
                Some(latest) => format!("the newest published version is {}", latest.version),
                None => "it has no published versions".to_string(),
            };
            self.errors.push(unsatisfiable(reason));
            return None;
        };

        let version = self
            .pins
            .get(name)
            .or_else(|| self.chosen.get(name))
            .copied()
            .unwrap_or(best.version);
        self.chosen.entry(name.clone()).or_insert(version);

        let entry = manifest.get(&version)?;
        Some((ResolvedNode::new(name.clone(), version), entry))
    }

    fn visit(&mut self, node: ResolvedNode, entry: &'m VersionEntry) {
        if !self.visited.visit(&node.name, node.version) {
            return;
        }
        let from = self.graph.add_node(node.clone());
        self.path.push(node.clone());

        for (dep, constraint) in &entry.dependencies {
            if let Some(start) = self.path.iter().position(|n| &n.name == dep) {
                let mut cycle = self.path[start..].to_vec();
                cycle.push(self.path[start].clone());
                tracing::debug!("cycle through {dep}");
                self.errors.push(ResolutionError::DependencyCycle { path: cycle });
                continue;
            }

            self.requirements
                .entry(dep.clone())
                .or_default()
                .push(Requirement {
                    path: self.path.clone(),
                    constraint: constraint.clone(),
                });

            let Some((child, child_entry)) = self.select(Some(&node), dep, constraint) else {
                continue;
            };
            let to = self.graph.add_node(child.clone());
            self.graph.add_edge(
                from,
                to,
                DepEdge {
                    constraint: constraint.clone(),
                },
            );
            self.visit(child, child_entry);
        }

        self.path.pop();
    }

    fn finish(self, conflicts: Vec<ResolutionError>) -> Result<ResolutionPlan, ResolutionFailure> {
        let Pass { graph, errors, .. } = self;
        let mut failure = ResolutionFailure::new();
        for error in errors.into_iter().chain(conflicts) {
            failure.add(error);
        }
        let root = graph.root;
        match root {
            Some(root_idx) if failure.is_empty() => into_plan(graph, root_idx),
            _ => Err(failure),
        }
    }
}

fn into_plan(
    graph: DependencyGraph,
    root_idx: NodeIndex,
) -> Result<ResolutionPlan, ResolutionFailure> {
    let root = graph.node(root_idx).clone();
    let packages = match graph.install_order() {
        Ok(order) => order.into_iter().cloned().collect(),
        Err(node) => {
            let mut failure = ResolutionFailure::new();
            failure.add(ResolutionError::DependencyCycle {
                path: vec![node.clone()],
            });
            return Err(failure);
        }
    };
    tracing::debug!("resolved {} package(s) for {root}", graph.len());
    Ok(ResolutionPlan {
        root,
        packages,
        graph,
    })
}
