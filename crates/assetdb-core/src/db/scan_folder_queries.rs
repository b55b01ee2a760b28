//! Scan folder lookups.

use super::{columns::ScanFolderColumns, statements::StatementId};
use crate::{error::Result, models::ScanFolderEntry};

impl super::AssetDatabaseConnection {
    pub fn query_scan_folders_table<F>(&self, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        self.query(StatementId::ScanFolders)?
            .rows::<ScanFolderColumns, _>(None, handler)
    }

    pub fn query_scan_folder_by_scan_folder_id<F>(&self, scan_folder_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        self.query(StatementId::ScanFolderById)?
            .bind(":scanfolderid", scan_folder_id)?
            .rows::<ScanFolderColumns, _>(None, handler)
    }

    pub fn query_scan_folder_by_display_name<F>(&self, display_name: &str, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        self.query(StatementId::ScanFolderByDisplayName)?
            .bind(":displayname", display_name)?
            .rows::<ScanFolderColumns, _>(None, handler)
    }

    pub fn query_scan_folder_by_portable_key<F>(&self, portable_key: &str, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        self.query(StatementId::ScanFolderByPortableKey)?
            .bind(":portablekey", portable_key)?
            .rows::<ScanFolderColumns, _>(None, handler)
    }

    /// The scan folder that owns a source.
    pub fn query_scan_folder_by_source_id<F>(&self, source_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        match self.find_source(source_id)? {
            Some(source) => self.query_scan_folder_by_scan_folder_id(source.scan_folder_id, handler),
            None => Ok(()),
        }
    }

    /// The scan folder that owns a job's source.
    pub fn query_scan_folder_by_job_id<F>(&self, job_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        match self.find_job(job_id)? {
            Some(job) => self.query_scan_folder_by_source_id(job.source_id, handler),
            None => Ok(()),
        }
    }

    /// The scan folder that owns the source a product was built from.
    pub fn query_scan_folder_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ScanFolderEntry) -> bool,
    {
        match self.find_product(product_id)? {
            Some(product) => self.query_scan_folder_by_job_id(product.job_id, handler),
            None => Ok(()),
        }
    }

    pub(crate) fn find_scan_folder(&self, scan_folder_id: i64) -> Result<Option<ScanFolderEntry>> {
        self.query(StatementId::ScanFolderById)?
            .bind(":scanfolderid", scan_folder_id)?
            .first::<ScanFolderColumns>(None)
    }
}
