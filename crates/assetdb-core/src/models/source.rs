use serde::Serialize;
use uuid::Uuid;

/// A source file, named relative to its scan folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceEntry {
    pub id: i64,
    pub scan_folder_id: i64,
    /// Path relative to the owning scan folder
    pub name: String,
    pub guid: Uuid,
}

impl SourceEntry {
    pub fn new(scan_folder_id: i64, name: impl Into<String>, guid: Uuid) -> Self {
        Self {
            id: -1,
            scan_folder_id,
            name: name.into(),
            guid,
        }
    }
}

impl Default for SourceEntry {
    fn default() -> Self {
        Self::new(-1, "", Uuid::nil())
    }
}
