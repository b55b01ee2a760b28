//! Job lookups.
//!
//! Queries that take a [`JobFilter`] narrow by platform in SQL and check the
//! remaining constraints on each fetched row.

use super::{columns::JobColumns, statements::StatementId};
use crate::{
    error::Result,
    models::{JobEntry, JobFilter},
};

impl super::AssetDatabaseConnection {
    pub fn query_jobs_table<F>(&self, filter: &JobFilter, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::Jobs.for_platform(platform))?
            .bind_platform(platform)?
            .rows::<JobColumns, _>(Some(filter), handler)
    }

    pub fn query_job_by_job_id<F>(&self, job_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        self.query(StatementId::JobById)?
            .bind(":jobid", job_id)?
            .rows::<JobColumns, _>(None, handler)
    }

    pub fn query_job_by_job_key<F>(&self, job_key: &str, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        self.query(StatementId::JobsByJobKey)?
            .bind(":jobkey", job_key)?
            .rows::<JobColumns, _>(None, handler)
    }

    pub fn query_job_by_job_run_key<F>(&self, job_run_key: u64, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        self.query(StatementId::JobByJobRunKey)?
            .bind(":jobrunkey", job_run_key as i64)?
            .rows::<JobColumns, _>(None, handler)
    }

    /// The job that emitted a product.
    pub fn query_job_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        self.query(StatementId::JobByProductId)?
            .bind(":productid", product_id)?
            .rows::<JobColumns, _>(None, handler)
    }

    pub fn query_job_by_source_id<F>(&self, source_id: i64, filter: &JobFilter, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobEntry) -> bool,
    {
        let platform = filter.platform();
        self.query(StatementId::JobsBySourceId.for_platform(platform))?
            .bind(":sourceid", source_id)?
            .bind_platform(platform)?
            .rows::<JobColumns, _>(Some(filter), handler)
    }

    pub(crate) fn find_job(&self, job_id: i64) -> Result<Option<JobEntry>> {
        self.query(StatementId::JobById)?
            .bind(":jobid", job_id)?
            .first::<JobColumns>(None)
    }
}
