use serde::Serialize;

use super::{JobEntry, LegacySubIdEntry, ProductEntry, ScanFolderEntry, SourceEntry};

/// One row of the ScanFolders, Sources, Jobs and Products join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedEntry {
    pub scan_folder: ScanFolderEntry,
    pub source: SourceEntry,
    pub job: JobEntry,
    pub product: ProductEntry,
    /// Populated only when the caller asks for legacy sub ids
    pub legacy_sub_ids: Vec<LegacySubIdEntry>,
}
