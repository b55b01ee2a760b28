//! Core library for the asset dependency database.
//!
//! The asset database records which source files live in which scan
//! folders, which jobs processed them for which platform, which products
//! those jobs emitted, and how products and sources depend on each other.
//! This crate is the typed access layer over that SQLite store.
//!
//! Every query streams rows into a handler `FnMut(&mut Entry) -> bool`;
//! returning `false` stops the iteration early and still counts as success.
//! A query that matches nothing returns `Ok(())` without calling the handler.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use assetdb_core::{ConnectionBuilder, JobFilter, JobStatus};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = ConnectionBuilder::new()
//!     .with_database_path(Some("assetdb.sqlite"))
//!     .open()?;
//!
//! let filter = JobFilter::any()
//!     .with_platform("pc")
//!     .with_status(JobStatus::Completed);
//! db.query_product_by_source_name("chars/hero.fbx", &filter, |product| {
//!     println!("{product}");
//!     true
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use builder::ConnectionBuilder;
pub use config::{
    DatabaseLocation, Filesystem, FixedLocation, OpenMode, StdFilesystem, XdgCacheLocation,
    DEFAULT_DATABASE_FILE,
};
pub use db::{like_search_term, AssetDatabaseConnection, StatementId, MAX_DEPENDENCY_ROWS};
pub use error::{AssetDbError, Result};
pub use models::{
    AssetId, CombinedEntry, DatabaseInfoEntry, DatabaseVersion, JobEntry, JobFilter, JobInfo,
    JobStatus, LegacySubIdEntry, LikeType, ProductDependencyEntry, ProductEntry, ScanFolderEntry,
    SourceEntry, SourceFileDependencyEntry,
};
