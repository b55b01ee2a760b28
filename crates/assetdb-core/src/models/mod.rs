//! Row types for the asset database.
//!
//! Each entry mirrors one table (or, for [`CombinedEntry`] and [`JobInfo`],
//! one join). Ids are `-1` until a row has been stored. Equality follows the
//! identity of each entity rather than its primary key, so a round-tripped
//! row compares equal to the value that was written. Display
//! implementations live in [`crate::display`].

pub mod combined;
pub mod database_info;
pub mod dependency;
pub mod filters;
pub mod job;
pub mod job_info;
pub mod product;
pub mod scan_folder;
pub mod source;
pub mod status;

#[cfg(test)]
mod tests;

pub use combined::CombinedEntry;
pub use database_info::DatabaseInfoEntry;
pub use dependency::{AssetId, ProductDependencyEntry, SourceFileDependencyEntry};
pub use filters::JobFilter;
pub use job::JobEntry;
pub use job_info::JobInfo;
pub use product::{LegacySubIdEntry, ProductEntry};
pub use scan_folder::ScanFolderEntry;
pub use source::SourceEntry;
pub use status::{DatabaseVersion, JobStatus, LikeType};
