//! Status enumerations and schema version markers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Processing state of a job.
///
/// `Any` is a query-only wildcard and is never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Matches every status when used in a filter
    #[default]
    Any,
    Queued,
    InProgress,
    Failed,
    /// The source path exceeded the platform's maximum length
    FailedInvalidSourceNameExceedsMaxLimit,
    Completed,
    Missing,
}

impl JobStatus {
    /// Every storable status, in stored-value order.
    pub const STORED: [JobStatus; 6] = [
        JobStatus::Queued,
        JobStatus::InProgress,
        JobStatus::Failed,
        JobStatus::FailedInvalidSourceNameExceedsMaxLimit,
        JobStatus::Completed,
        JobStatus::Missing,
    ];

    /// The INTEGER value stored in the `Jobs.Status` column.
    pub fn as_i64(self) -> i64 {
        match self {
            JobStatus::Any => -1,
            JobStatus::Queued => 0,
            JobStatus::InProgress => 1,
            JobStatus::Failed => 2,
            JobStatus::FailedInvalidSourceNameExceedsMaxLimit => 3,
            JobStatus::Completed => 4,
            JobStatus::Missing => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Any => "any",
            JobStatus::Queued => "queued",
            JobStatus::InProgress => "in_progress",
            JobStatus::Failed => "failed",
            JobStatus::FailedInvalidSourceNameExceedsMaxLimit => "failed_invalid_source_name",
            JobStatus::Completed => "completed",
            JobStatus::Missing => "missing",
        }
    }

    /// Whether `self`, used as a filter, accepts a row with `stored`.
    pub fn accepts(self, stored: JobStatus) -> bool {
        self == JobStatus::Any || self == stored
    }
}

impl TryFrom<i64> for JobStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(JobStatus::Any),
            0 => Ok(JobStatus::Queued),
            1 => Ok(JobStatus::InProgress),
            2 => Ok(JobStatus::Failed),
            3 => Ok(JobStatus::FailedInvalidSourceNameExceedsMaxLimit),
            4 => Ok(JobStatus::Completed),
            5 => Ok(JobStatus::Missing),
            other => Err(format!("Invalid job status value: {other}")),
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "any" => Ok(JobStatus::Any),
            "queued" => Ok(JobStatus::Queued),
            "in_progress" | "inprogress" => Ok(JobStatus::InProgress),
            "failed" => Ok(JobStatus::Failed),
            "failed_invalid_source_name" => Ok(JobStatus::FailedInvalidSourceNameExceedsMaxLimit),
            "completed" => Ok(JobStatus::Completed),
            "missing" => Ok(JobStatus::Missing),
            _ => Err(format!("Invalid job status: {s}")),
        }
    }
}

/// How a caller-supplied term is turned into a LIKE pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LikeType {
    /// `term%`
    #[default]
    StartsWith,
    /// `%term`
    EndsWith,
    /// `%term%`
    Matches,
    /// The term is already a LIKE pattern and is passed through unescaped
    Raw,
}

/// Schema version stamped into the `dbinfo` table.
///
/// Versions are ordered; only [`DatabaseVersion::CURRENT`] can be opened.
/// Unknown stored values are kept as-is so a mismatch can be reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct DatabaseVersion(pub i64);

impl DatabaseVersion {
    pub const DATABASE_DOES_NOT_EXIST: DatabaseVersion = DatabaseVersion(-1);
    pub const STARTING_VERSION: DatabaseVersion = DatabaseVersion(1);
    pub const ADDED_OUTPUT_PREFIX_TO_SCAN_FOLDERS: DatabaseVersion = DatabaseVersion(2);
    pub const ADDED_JOB_KEY_INDEX: DatabaseVersion = DatabaseVersion(3);
    pub const ADDED_SOURCE_GUID_INDEX: DatabaseVersion = DatabaseVersion(4);
    pub const ADDED_SOURCE_DEPENDENCY_TABLE: DatabaseVersion = DatabaseVersion(5);
    pub const ADDED_LEGACY_SUB_IDS_TABLE: DatabaseVersion = DatabaseVersion(6);
    pub const ADDED_PRODUCT_DEPENDENCY_TABLE: DatabaseVersion = DatabaseVersion(7);
    pub const CLEAR_AUTO_SUCCEED_JOBS: DatabaseVersion = DatabaseVersion(8);

    /// The only version this library reads and writes.
    pub const CURRENT: DatabaseVersion = Self::CLEAR_AUTO_SUCCEED_JOBS;

    pub fn name(&self) -> Option<&'static str> {
        let name = match self.0 {
            -1 => "DatabaseDoesNotExist",
            1 => "StartingVersion",
            2 => "AddedOutputPrefixToScanFolders",
            3 => "AddedJobKeyIndex",
            4 => "AddedSourceGuidIndex",
            5 => "AddedSourceDependencyTable",
            6 => "AddedLegacySubIDsTable",
            7 => "AddedProductDependencyTable",
            8 => "ClearAutoSucceedJobs",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for DatabaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{} (unknown)", self.0),
        }
    }
}
