use serde::Serialize;

use super::DatabaseVersion;

/// The singleton `dbinfo` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatabaseInfoEntry {
    pub row_id: i64,
    pub version: DatabaseVersion,
}
