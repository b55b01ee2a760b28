use serde::Serialize;
use uuid::Uuid;

use super::JobStatus;

/// A job resolved together with its source file and watch folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobInfo {
    pub job_id: i64,
    /// Source name relative to the watch folder
    pub source_file: String,
    /// Absolute path of the owning scan folder
    pub watch_folder: String,
    pub platform: String,
    pub builder_guid: Uuid,
    pub job_key: String,
    pub status: JobStatus,
    pub job_run_key: u64,
    pub first_fail_log_time: i64,
    pub first_fail_log_file: String,
    pub last_fail_log_time: i64,
    pub last_fail_log_file: String,
    pub last_log_time: i64,
    pub last_log_file: String,
}
