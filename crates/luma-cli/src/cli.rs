//! CLI argument definitions for Luma.
//!
//! Uses `clap` derive macros; each command has a handler in
//! [`super::commands`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "luma",
    version,
    about = "Maintenance tool for the Luma package registry",
    long_about = "Validates package manifests, rebuilds the global index, \
                  resolves dependency plans and verifies published archives."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry root (defaults to the nearest directory containing luma.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate package manifests
    Validate {
        /// Manifest files or package directories (all manifests when omitted)
        paths: Vec<PathBuf>,
    },

    /// Validate an author-side package.json descriptor
    ValidatePackage {
        /// Descriptor file or the directory containing it
        path: PathBuf,
    },

    /// Rebuild the global index from the manifests
    Index {
        /// Report whether the index is up to date without writing it
        #[arg(long)]
        check: bool,
    },

    /// Compute the install plan for a package
    Resolve {
        /// Root package name
        package: String,
        /// Version constraint on the root package
        #[arg(short, long, value_name = "EXPR")]
        constraint: Option<String>,
        /// Print the dependency tree instead of the install order
        #[arg(long, conflicts_with = "why")]
        tree: bool,
        /// Show how the root comes to depend on a package
        #[arg(long, value_name = "PKG")]
        why: Option<String>,
    },

    /// Check an archive against its published checksum and size
    Verify {
        /// Archive file
        archive: PathBuf,
        /// Package name
        package: String,
        /// Published version
        version: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
