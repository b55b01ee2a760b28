use serde::Serialize;
use uuid::Uuid;

use super::JobStatus;

/// One processing job: a source, processed by one builder, for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct JobEntry {
    pub id: i64,
    pub source_id: i64,
    pub job_key: String,
    pub fingerprint: u32,
    pub platform: String,
    pub builder_guid: Uuid,
    pub status: JobStatus,
    /// Monotonic key identifying a particular run of the job
    pub job_run_key: u64,
    pub first_fail_log_time: i64,
    pub first_fail_log_file: String,
    pub last_fail_log_time: i64,
    pub last_fail_log_file: String,
    pub last_log_time: i64,
    pub last_log_file: String,
}

impl JobEntry {
    pub fn new(
        source_id: i64,
        job_key: impl Into<String>,
        platform: impl Into<String>,
        builder_guid: Uuid,
        status: JobStatus,
        job_run_key: u64,
    ) -> Self {
        Self {
            id: -1,
            source_id,
            job_key: job_key.into(),
            fingerprint: 0,
            platform: platform.into(),
            builder_guid,
            status,
            job_run_key,
            first_fail_log_time: 0,
            first_fail_log_file: String::new(),
            last_fail_log_time: 0,
            last_fail_log_file: String::new(),
            last_log_time: 0,
            last_log_file: String::new(),
        }
    }
}

impl Default for JobEntry {
    fn default() -> Self {
        Self::new(-1, "", "", Uuid::nil(), JobStatus::Queued, 0)
    }
}

/// Everything except the id; strings compare without case.
impl PartialEq for JobEntry {
    fn eq(&self, other: &Self) -> bool {
        self.source_id == other.source_id
            && self.job_key.eq_ignore_ascii_case(&other.job_key)
            && self.fingerprint == other.fingerprint
            && self.platform.eq_ignore_ascii_case(&other.platform)
            && self.builder_guid == other.builder_guid
            && self.status == other.status
            && self.job_run_key == other.job_run_key
            && self.first_fail_log_time == other.first_fail_log_time
            && self.first_fail_log_file.eq_ignore_ascii_case(&other.first_fail_log_file)
            && self.last_fail_log_time == other.last_fail_log_time
            && self.last_fail_log_file.eq_ignore_ascii_case(&other.last_fail_log_file)
            && self.last_log_time == other.last_log_time
            && self.last_log_file.eq_ignore_ascii_case(&other.last_log_file)
    }
}

impl Eq for JobEntry {}
