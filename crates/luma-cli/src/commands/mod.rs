//! Command dispatch and handler modules.

mod index;
mod resolve;
mod validate;
mod validate_package;
mod verify;

use std::path::Path;

use miette::Result;

use luma_index::ValidationError;
use luma_ops::Registry;
use luma_util::errors::LumaError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let registry = cli.registry.as_deref();
    match cli.command {
        Command::Validate { paths } => validate::exec(registry, &paths),
        Command::ValidatePackage { path } => validate_package::exec(&path),
        Command::Index { check } => index::exec(registry, check),
        Command::Resolve {
            package,
            constraint,
            tree,
            why,
        } => resolve::exec(registry, package, constraint, tree, why),
        Command::Verify {
            archive,
            package,
            version,
        } => verify::exec(registry, &archive, &package, &version),
    }
}

/// Open the registry named by `--registry`, or discover one from the
/// current directory.
fn open_registry(explicit: Option<&Path>) -> Result<Registry> {
    match explicit {
        Some(root) => {
            if !root.is_dir() {
                return Err(LumaError::Config {
                    message: format!("registry root {} is not a directory", root.display()),
                }
                .into());
            }
            Registry::open(root)
        }
        None => {
            let cwd = std::env::current_dir().map_err(LumaError::Io)?;
            Registry::discover(&cwd)
        }
    }
}

/// Print diagnostics one per line on stdout.
fn print_diagnostics(errors: &[ValidationError]) {
    for error in errors {
        println!("{error}");
    }
}
