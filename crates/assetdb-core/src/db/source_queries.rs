//! Source lookups.

use uuid::Uuid;

use super::{columns::SourceColumns, statements::StatementId, utils::like_search_term};
use crate::{
    error::Result,
    models::{LikeType, SourceEntry},
};

impl super::AssetDatabaseConnection {
    pub fn query_sources_table<F>(&self, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::Sources)?
            .rows::<SourceColumns, _>(None, handler)
    }

    pub fn query_source_by_source_id<F>(&self, source_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourceById)?
            .bind(":sourceid", source_id)?
            .rows::<SourceColumns, _>(None, handler)
    }

    pub fn query_source_by_scan_folder_id<F>(&self, scan_folder_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourcesByScanFolderId)?
            .bind(":scanfolderid", scan_folder_id)?
            .rows::<SourceColumns, _>(None, handler)
    }

    pub fn query_source_by_source_guid<F>(&self, source_guid: Uuid, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourceByGuid)?
            .bind(":sourceguid", source_guid)?
            .rows::<SourceColumns, _>(None, handler)
    }

    /// Every source with this name, in any scan folder.
    pub fn query_source_by_source_name<F>(&self, source_name: &str, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourcesBySourceName)?
            .bind(":sourcename", source_name)?
            .rows::<SourceColumns, _>(None, handler)
    }

    pub fn query_source_by_source_name_scan_folder_id<F>(
        &self,
        source_name: &str,
        scan_folder_id: i64,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourceBySourceNameScanFolderId)?
            .bind(":sourcename", source_name)?
            .bind(":scanfolderid", scan_folder_id)?
            .rows::<SourceColumns, _>(None, handler)
    }

    /// Sources whose name matches `term` as described by `like_type`.
    pub fn query_source_like_source_name<F>(
        &self,
        term: &str,
        like_type: LikeType,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        self.query(StatementId::SourcesLikeSourceName)?
            .bind(":sourcename", like_search_term(term, like_type))?
            .rows::<SourceColumns, _>(None, handler)
    }

    /// The source a job processes.
    pub fn query_source_by_job_id<F>(&self, job_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        match self.find_job(job_id)? {
            Some(job) => self.query_source_by_source_id(job.source_id, handler),
            None => Ok(()),
        }
    }

    /// The source a product was built from.
    pub fn query_source_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut SourceEntry) -> bool,
    {
        match self.find_product(product_id)? {
            Some(product) => self.query_source_by_job_id(product.job_id, handler),
            None => Ok(()),
        }
    }

    pub(crate) fn find_source(&self, source_id: i64) -> Result<Option<SourceEntry>> {
        self.query(StatementId::SourceById)?
            .bind(":sourceid", source_id)?
            .first::<SourceColumns>(None)
    }
}
