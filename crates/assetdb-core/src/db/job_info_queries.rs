//! Jobs resolved together with their source file and watch folder.
//!
//! Each job is joined to its source and that source's scan folder by point
//! lookups. A job whose chain is broken is skipped rather than failing the
//! whole call.

use log::debug;

use super::{columns::JobColumns, statements::StatementId};
use crate::{
    error::Result,
    models::{JobEntry, JobFilter, JobInfo, ScanFolderEntry, SourceEntry},
};

fn job_info(job: &JobEntry, source: &SourceEntry, scan_folder: &ScanFolderEntry) -> JobInfo {
    JobInfo {
        job_id: job.id,
        source_file: source.name.clone(),
        watch_folder: scan_folder.path.clone(),
        platform: job.platform.clone(),
        builder_guid: job.builder_guid,
        job_key: job.job_key.clone(),
        status: job.status,
        job_run_key: job.job_run_key,
        first_fail_log_time: job.first_fail_log_time,
        first_fail_log_file: job.first_fail_log_file.clone(),
        last_fail_log_time: job.last_fail_log_time,
        last_fail_log_file: job.last_fail_log_file.clone(),
        last_log_time: job.last_log_time,
        last_log_file: job.last_log_file.clone(),
    }
}

impl super::AssetDatabaseConnection {
    pub fn query_job_info_by_job_id<F>(&self, job_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobInfo) -> bool,
    {
        let jobs: Vec<JobEntry> = self.find_job(job_id)?.into_iter().collect();
        self.deliver_job_infos(&jobs, handler)
    }

    pub fn query_job_info_by_job_run_key<F>(&self, job_run_key: u64, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobInfo) -> bool,
    {
        let jobs = self
            .query(StatementId::JobByJobRunKey)?
            .bind(":jobrunkey", job_run_key as i64)?
            .collect::<JobColumns>(None)?;
        self.deliver_job_infos(&jobs, handler)
    }

    pub fn query_job_info_by_job_key<F>(&self, job_key: &str, handler: F) -> Result<()>
    where
        F: FnMut(&mut JobInfo) -> bool,
    {
        let jobs = self
            .query(StatementId::JobsByJobKey)?
            .bind(":jobkey", job_key)?
            .collect::<JobColumns>(None)?;
        self.deliver_job_infos(&jobs, handler)
    }

    /// Jobs of every source with this name that pass `filter`.
    pub fn query_job_info_by_source_name<F>(
        &self,
        source_name: &str,
        filter: &JobFilter,
        mut handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut JobInfo) -> bool,
    {
        let mut sources = Vec::new();
        self.query_source_by_source_name(source_name, |source| {
            sources.push(source.clone());
            true
        })?;

        for source in &sources {
            let Some(scan_folder) = self.find_scan_folder(source.scan_folder_id)? else {
                debug!("Source {} has no scan folder", source.id);
                continue;
            };
            let mut jobs = Vec::new();
            self.query_job_by_source_id(source.id, filter, |job| {
                jobs.push(job.clone());
                true
            })?;
            for job in &jobs {
                if !handler(&mut job_info(job, source, &scan_folder)) {
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    fn deliver_job_infos<F>(&self, jobs: &[JobEntry], mut handler: F) -> Result<()>
    where
        F: FnMut(&mut JobInfo) -> bool,
    {
        for job in jobs {
            let Some(source) = self.find_source(job.source_id)? else {
                debug!("Job {} has no source", job.id);
                continue;
            };
            let Some(scan_folder) = self.find_scan_folder(source.scan_folder_id)? else {
                debug!("Source {} has no scan folder", source.id);
                continue;
            };
            if !handler(&mut job_info(job, &source, &scan_folder)) {
                break;
            }
        }
        Ok(())
    }
}
