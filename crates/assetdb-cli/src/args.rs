use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DependencyArgs, JobArgs, ProductArgs, SourceArgs, SourceDependencyArgs};

/// Read-only inspector for asset dependency databases
///
/// Lists scan folders, sources, jobs and products recorded by the asset
/// processor, and walks product and source file dependencies. The database
/// is always opened read-only.
#[derive(Parser)]
#[command(version, about, name = "assetdb")]
pub struct Args {
    /// Path to the asset database. Defaults to
    /// $XDG_CACHE_HOME/assetdb/assetdb.sqlite
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands; without one, `info` is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the database location and schema version
    Info,
    /// List scan folders
    #[command(alias = "sf")]
    ScanFolders,
    /// List or search source files
    #[command(alias = "s")]
    Sources(SourceArgs),
    /// List jobs, optionally for one source file
    #[command(alias = "j")]
    Jobs(JobArgs),
    /// List or search products
    #[command(alias = "p")]
    Products(ProductArgs),
    /// Show what a product depends on
    #[command(alias = "d")]
    Deps(DependencyArgs),
    /// Show source file dependencies
    SourceDeps(SourceDependencyArgs),
}
