//! Display implementations for the row types.
//!
//! Every entry formats as a single line of `key: value` pairs, suitable for
//! log messages and plain listings.

use std::fmt;

use crate::models::{
    AssetId, CombinedEntry, DatabaseInfoEntry, JobEntry, JobInfo, JobStatus, LegacySubIdEntry,
    LikeType, ProductDependencyEntry, ProductEntry, ScanFolderEntry, SourceEntry,
    SourceFileDependencyEntry,
};

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for LikeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LikeType::StartsWith => "starts with",
            LikeType::EndsWith => "ends with",
            LikeType::Matches => "matches",
            LikeType::Raw => "raw",
        };
        f.write_str(name)
    }
}

impl fmt::Display for DatabaseInfoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dbinfo row: {} version: {}", self.row_id, self.version)
    }
}

impl fmt::Display for ScanFolderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scan folder id: {} path: {} display name: {} portable key: {}",
            self.id, self.path, self.display_name, self.portable_key
        )?;
        if !self.output_prefix.is_empty() {
            write!(f, " output prefix: {}", self.output_prefix)?;
        }
        if self.is_root {
            write!(f, " (root)")?;
        }
        Ok(())
    }
}

impl fmt::Display for SourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source id: {} scan folder id: {} name: {} guid: {}",
            self.id,
            self.scan_folder_id,
            self.name,
            self.guid.braced()
        )
    }
}

impl fmt::Display for JobEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "job id: {} source id: {} job key: {} platform: {} builder: {} status: {} fingerprint: {} run key: {}",
            self.id,
            self.source_id,
            self.job_key,
            self.platform,
            self.builder_guid.braced(),
            self.status,
            self.fingerprint,
            self.job_run_key
        )
    }
}

impl fmt::Display for ProductEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "product id: {} job id: {} sub id: {} name: {} asset type: {}",
            self.id,
            self.job_id,
            self.sub_id,
            self.name,
            self.asset_type.braced()
        )?;
        if !self.legacy_guid.is_nil() {
            write!(f, " legacy guid: {}", self.legacy_guid.braced())?;
        }
        Ok(())
    }
}

impl fmt::Display for LegacySubIdEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "legacy sub id: {} product id: {} sub id: {}",
            self.id, self.product_id, self.sub_id
        )
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:x}", self.guid.braced(), self.sub_id)
    }
}

impl fmt::Display for ProductDependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "product dependency id: {} product id: {} depends on: {} flags: {:#x}",
            self.id,
            self.product_id,
            self.target(),
            self.dependency_flags
        )
    }
}

impl fmt::Display for SourceFileDependencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "source dependency id: {} builder: {} source: {} depends on: {}",
            self.id,
            self.builder_guid.braced(),
            self.source,
            self.depends_on_source
        )
    }
}

impl fmt::Display for CombinedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} [{}] -> {} (sub id {})",
            self.scan_folder.display_name,
            self.source.name,
            self.job.platform,
            self.product.name,
            self.product.sub_id
        )
    }
}

impl fmt::Display for JobInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "job id: {} source: {} watch folder: {} platform: {} job key: {} status: {}",
            self.job_id,
            self.source_file,
            self.watch_folder,
            self.platform,
            self.job_key,
            self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::models::{AssetId, JobStatus, ProductEntry, ScanFolderEntry};

    #[test]
    fn test_scan_folder_display_marks_roots() {
        let mut folder = ScanFolderEntry::new("/work/assets", "Assets", "root");
        folder.id = 3;
        folder.is_root = true;
        assert_eq!(
            folder.to_string(),
            "scan folder id: 3 path: /work/assets display name: Assets portable key: root (root)"
        );
    }

    #[test]
    fn test_product_display_omits_nil_legacy_guid() {
        let product = ProductEntry::new(1, 2, "hero.actor", Uuid::nil());
        assert!(!product.to_string().contains("legacy guid"));
    }

    #[test]
    fn test_asset_id_display_uses_hex_sub_id() {
        let id = AssetId::new(Uuid::nil(), 255);
        assert_eq!(id.to_string(), "{00000000-0000-0000-0000-000000000000}:ff");
        assert_eq!(JobStatus::InProgress.to_string(), "in_progress");
    }
}
