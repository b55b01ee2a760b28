//! Scan folder rows.

use serde::Serialize;

/// A watched root directory.
///
/// Two scan folders are equal when their portable keys are equal; the key
/// is the identity that survives a move to another machine.
#[derive(Debug, Clone, Serialize)]
pub struct ScanFolderEntry {
    /// `-1` until the row is stored
    pub id: i64,
    /// Absolute path on this machine
    pub path: String,
    pub display_name: String,
    /// Machine-independent identifier
    pub portable_key: String,
    pub output_prefix: String,
    pub is_root: bool,
}

impl ScanFolderEntry {
    pub fn new(
        path: impl Into<String>,
        display_name: impl Into<String>,
        portable_key: impl Into<String>,
    ) -> Self {
        Self {
            id: -1,
            path: path.into(),
            display_name: display_name.into(),
            portable_key: portable_key.into(),
            output_prefix: String::new(),
            is_root: false,
        }
    }
}

impl Default for ScanFolderEntry {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

impl PartialEq for ScanFolderEntry {
    fn eq(&self, other: &Self) -> bool {
        self.portable_key == other.portable_key
    }
}

impl Eq for ScanFolderEntry {}
