use std::path::Path;

use miette::Result;

use luma_ops::ops_resolve::{self, ResolveOptions, ResolveView};
use luma_util::errors::LumaError;

pub fn exec(
    registry: Option<&Path>,
    package: String,
    constraint: Option<String>,
    tree: bool,
    why: Option<String>,
) -> Result<()> {
    let registry = super::open_registry(registry)?;
    let view = match (tree, why) {
        (_, Some(target)) => ResolveView::Why(target),
        (true, None) => ResolveView::Tree,
        (false, None) => ResolveView::Plan,
    };
    let opts = ResolveOptions {
        package,
        constraint,
        view,
    };

    match ops_resolve::resolve(&registry, &opts)? {
        Ok(plan) => {
            print!("{}", ops_resolve::render(&plan, &opts.view)?);
            Ok(())
        }
        Err(failure) => {
            for error in &failure.errors {
                println!("{error}");
            }
            Err(LumaError::Resolution {
                message: format!("{} error(s) while resolving {}", failure.len(), opts.package),
            }
            .into())
        }
    }
}
