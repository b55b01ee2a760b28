//! Queries over the ScanFolders, Sources, Jobs and Products join.

use uuid::Uuid;

use super::{
    columns::{CombinedColumns, LegacySubIdColumns},
    statements::StatementId,
    utils::like_search_term,
};
use crate::{
    error::Result,
    models::{CombinedEntry, JobFilter, LegacySubIdEntry, LikeType},
};

impl super::AssetDatabaseConnection {
    /// Every joined row, optionally with each product's legacy sub ids.
    pub fn query_combined<F>(
        &self,
        filter: &JobFilter,
        include_legacy_sub_ids: bool,
        mut handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        let query = self
            .query(StatementId::Combined.for_platform(platform))?
            .bind_platform(platform)?;
        if !include_legacy_sub_ids {
            return query.rows::<CombinedColumns, _>(Some(filter), handler);
        }

        let mut lookup_error = None;
        query.rows::<CombinedColumns, _>(Some(filter), |entry| {
            match self.legacy_sub_ids(entry.product.id) {
                Ok(legacy_sub_ids) => {
                    entry.legacy_sub_ids = legacy_sub_ids;
                    handler(entry)
                }
                Err(e) => {
                    lookup_error = Some(e);
                    false
                }
            }
        })?;
        lookup_error.map_or(Ok(()), Err)
    }

    pub fn query_combined_by_source_id<F>(
        &self,
        source_id: i64,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedBySourceId.for_platform(platform))?
            .bind(":sourceid", source_id)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_by_job_id<F>(&self, job_id: i64, filter: &JobFilter, handler: F) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedByJobId.for_platform(platform))?
            .bind(":jobid", job_id)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_by_product_id<F>(
        &self,
        product_id: i64,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedByProductId.for_platform(platform))?
            .bind(":productid", product_id)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    /// The joined rows for the product known as `(source_guid, sub_id)`.
    pub fn query_combined_by_source_guid_product_sub_id<F>(
        &self,
        source_guid: Uuid,
        product_sub_id: u32,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedBySourceGuidProductSubId.for_platform(platform))?
            .bind(":sourceguid", source_guid)?
            .bind(":productsubid", product_sub_id)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_by_source_name<F>(
        &self,
        source_name: &str,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedBySourceName.for_platform(platform))?
            .bind(":sourcename", source_name)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_like_source_name<F>(
        &self,
        term: &str,
        like_type: LikeType,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedLikeSourceName.for_platform(platform))?
            .bind(":sourcename", like_search_term(term, like_type))?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_by_product_name<F>(
        &self,
        product_name: &str,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedByProductName.for_platform(platform))?
            .bind(":productname", product_name)?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    pub fn query_combined_like_product_name<F>(
        &self,
        term: &str,
        like_type: LikeType,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut CombinedEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::CombinedLikeProductName.for_platform(platform))?
            .bind(":productname", like_search_term(term, like_type))?
            .bind_platform(platform)?
            .rows::<CombinedColumns, _>(Some(filter), handler)
    }

    fn legacy_sub_ids(&self, product_id: i64) -> Result<Vec<LegacySubIdEntry>> {
        self.query(StatementId::LegacySubIdsByProductId)?
            .bind(":productid", product_id)?
            .collect::<LegacySubIdColumns>(None)
    }
}
