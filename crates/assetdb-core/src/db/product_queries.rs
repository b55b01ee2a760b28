//! Product and legacy sub id lookups.

use super::{
    columns::{LegacySubIdColumns, ProductColumns},
    statements::StatementId,
    utils::like_search_term,
};
use crate::{
    error::Result,
    models::{JobFilter, LegacySubIdEntry, LikeType, ProductEntry},
};

impl super::AssetDatabaseConnection {
    pub fn query_products_table<F>(&self, filter: &JobFilter, handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::Products.for_platform(platform))?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_product_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        self.query(StatementId::ProductById)?
            .bind(":productid", product_id)?
            .rows::<ProductColumns, _>(None, handler)
    }

    pub fn query_product_by_job_id<F>(&self, job_id: i64, filter: &JobFilter, handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsByJobId.for_platform(platform))?
            .bind(":jobid", job_id)?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_product_by_source_id<F>(
        &self,
        source_id: i64,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsBySourceId.for_platform(platform))?
            .bind(":sourceid", source_id)?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_product_by_product_name<F>(
        &self,
        product_name: &str,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsByProductName.for_platform(platform))?
            .bind(":productname", product_name)?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_product_like_product_name<F>(
        &self,
        term: &str,
        like_type: LikeType,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsLikeProductName.for_platform(platform))?
            .bind(":productname", like_search_term(term, like_type))?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    /// Products built from any source with this exact name.
    pub fn query_product_by_source_name<F>(
        &self,
        source_name: &str,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsBySourceName.for_platform(platform))?
            .bind(":sourcename", source_name)?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_product_like_source_name<F>(
        &self,
        term: &str,
        like_type: LikeType,
        filter: &JobFilter,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::ProductsLikeSourceName.for_platform(platform))?
            .bind(":sourcename", like_search_term(term, like_type))?
            .bind_platform(platform)?
            .rows::<ProductColumns, _>(Some(filter), handler)
    }

    pub fn query_legacy_sub_ids_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut LegacySubIdEntry) -> bool,
    {
        self.query(StatementId::LegacySubIdsByProductId)?
            .bind(":productid", product_id)?
            .rows::<LegacySubIdColumns, _>(None, handler)
    }

    pub(crate) fn find_product(&self, product_id: i64) -> Result<Option<ProductEntry>> {
        self.query(StatementId::ProductById)?
            .bind(":productid", product_id)?
            .first::<ProductColumns>(None)
    }
}
