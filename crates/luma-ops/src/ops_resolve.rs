//! Operation: compute and display an install plan.

use luma_core::{Constraint, PackageName};
use luma_resolver::{resolve as resolve_plan, ResolutionFailure, ResolutionPlan};
use luma_util::errors::LumaError;
use luma_util::output::{status, StatusKind};

use crate::registry::Registry;

/// How `luma resolve` presents a plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResolveView {
    /// One `name version` line per package, dependencies first.
    #[default]
    Plan,
    /// The dependency tree below the root.
    Tree,
    /// The chain of dependents leading from the root to one package.
    Why(String),
}

/// Options for `luma resolve`.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub package: String,
    /// Constraint on the root; any version when absent.
    pub constraint: Option<String>,
    pub view: ResolveView,
}

/// Resolve against every valid manifest in the registry.
///
/// The outer error covers bad input and unreadable registries; the inner
/// result is the resolution outcome itself. Invalid manifests are skipped
/// with a warning.
pub fn resolve(
    registry: &Registry,
    opts: &ResolveOptions,
) -> miette::Result<Result<ResolutionPlan, ResolutionFailure>> {
    let root = PackageName::parse(&opts.package).map_err(|e| LumaError::Generic {
        message: e.to_string(),
    })?;
    let constraint = match &opts.constraint {
        Some(expr) => Constraint::parse(expr).map_err(|e| LumaError::Generic {
            message: e.to_string(),
        })?,
        None => Constraint::any(),
    };

    let loaded = registry.load()?;
    if !loaded.errors.is_empty() {
        status(
            StatusKind::Warn,
            "Skipping",
            &format!(
                "{} invalid manifest(s); run `luma validate` for details",
                loaded.files - loaded.manifests.len()
            ),
        );
    }

    Ok(resolve_plan(&root, &constraint, &loaded.manifests))
}

/// Text for the chosen view.
pub fn render(plan: &ResolutionPlan, view: &ResolveView) -> miette::Result<String> {
    match view {
        ResolveView::Plan => Ok(plan
            .packages()
            .iter()
            .map(|node| format!("{} {}\n", node.name, node.version))
            .collect()),
        ResolveView::Tree => Ok(plan.graph().print_tree(None)),
        ResolveView::Why(target) => {
            let path = plan.graph().find_path(target).ok_or_else(|| LumaError::Generic {
                message: format!("'{target}' is not part of the resolved graph of {}", plan.root()),
            })?;
            Ok(path
                .iter()
                .enumerate()
                .map(|(depth, node)| format!("{}{node}\n", "  ".repeat(depth)))
                .collect())
        }
    }
}
