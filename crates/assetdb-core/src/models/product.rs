use serde::Serialize;
use uuid::Uuid;

/// An output file produced by a job.
#[derive(Debug, Clone, Serialize)]
pub struct ProductEntry {
    pub id: i64,
    pub job_id: i64,
    pub sub_id: u32,
    pub name: String,
    pub asset_type: Uuid,
    /// Older identity under which this product may still be referenced
    pub legacy_guid: Uuid,
}

impl ProductEntry {
    pub fn new(job_id: i64, sub_id: u32, name: impl Into<String>, asset_type: Uuid) -> Self {
        Self {
            id: -1,
            job_id,
            sub_id,
            name: name.into(),
            asset_type,
            legacy_guid: Uuid::nil(),
        }
    }
}

impl Default for ProductEntry {
    fn default() -> Self {
        Self::new(-1, 0, "", Uuid::nil())
    }
}

/// Owning job, sub id, asset type and a case-insensitive name.
impl PartialEq for ProductEntry {
    fn eq(&self, other: &Self) -> bool {
        self.job_id == other.job_id
            && self.sub_id == other.sub_id
            && self.asset_type == other.asset_type
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for ProductEntry {}

/// An older sub id under which a product was once known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacySubIdEntry {
    pub id: i64,
    pub product_id: i64,
    pub sub_id: u32,
}

impl LegacySubIdEntry {
    pub fn new(product_id: i64, sub_id: u32) -> Self {
        Self {
            id: -1,
            product_id,
            sub_id,
        }
    }
}
