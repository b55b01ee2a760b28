//! Post-fetch filters applied to Job-bearing rows.

use uuid::Uuid;

use super::{JobEntry, JobStatus};

/// Optional job constraints shared by every Job, Product and Combined query.
///
/// Unset fields mean "do not filter". The platform is pushed into the SQL by
/// selecting a platform-specific statement; the builder guid, job key and
/// status are checked on each fetched row, and rows failing any of them are
/// skipped without reaching the handler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// `None` or the nil guid matches any builder
    pub builder_guid: Option<Uuid>,
    /// `None` or empty matches any job key; compared without case
    pub job_key: Option<String>,
    /// `None` or empty selects the platform-agnostic statement
    pub platform: Option<String>,
    pub status: JobStatus,
}

impl JobFilter {
    /// A filter that accepts every row.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_builder_guid(mut self, builder_guid: Uuid) -> Self {
        self.builder_guid = Some(builder_guid);
        self
    }

    pub fn with_job_key(mut self, job_key: impl Into<String>) -> Self {
        self.job_key = Some(job_key.into());
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref().filter(|p| !p.is_empty())
    }

    pub fn builder_guid(&self) -> Option<Uuid> {
        self.builder_guid.filter(|guid| !guid.is_nil())
    }

    pub fn job_key(&self) -> Option<&str> {
        self.job_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Whether any per-row check is active.
    pub fn filters_rows(&self) -> bool {
        self.builder_guid().is_some() || self.job_key().is_some() || self.status != JobStatus::Any
    }

    /// Checks the per-row constraints against raw job column values.
    pub fn accepts(&self, builder_guid: &Uuid, job_key: &str, status: JobStatus) -> bool {
        let builder_matches = self.builder_guid().map_or(true, |wanted| wanted == *builder_guid);
        let key_matches = self
            .job_key()
            .map_or(true, |wanted| wanted.eq_ignore_ascii_case(job_key));
        builder_matches && key_matches && self.status.accepts(status)
    }

    pub fn accepts_job(&self, job: &JobEntry) -> bool {
        self.accepts(&job.builder_guid, &job.job_key, job.status)
    }
}
