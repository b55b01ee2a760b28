//! AssetDB CLI Application
//!
//! Read-only command-line inspector for asset dependency databases.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use assetdb_core::ConnectionBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        json,
        command,
    } = Args::parse();

    let builder = ConnectionBuilder::new().with_database_path(database_file);
    let path = builder.database_path();
    let db = builder
        .open()
        .with_context(|| format!("Failed to open asset database {}", path.display()))?;

    info!("Opened {} read-only", path.display());

    let cli = Cli::new(db, TerminalRenderer::new(!no_color), json);
    match command {
        Some(Info) | None => cli.show_info(),
        Some(ScanFolders) => cli.list_scan_folders(),
        Some(Sources(args)) => cli.list_sources(args),
        Some(Jobs(args)) => cli.list_jobs(args),
        Some(Products(args)) => cli.list_products(args),
        Some(Deps(args)) => cli.show_dependencies(args),
        Some(SourceDeps(args)) => cli.show_source_dependencies(args),
    }
}
