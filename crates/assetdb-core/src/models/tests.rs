#[cfg(test)]
mod model_tests {
    use uuid::Uuid;

    use crate::models::{
        DatabaseVersion, JobEntry, JobFilter, JobStatus, ProductDependencyEntry, ProductEntry,
        ScanFolderEntry,
    };

    fn builder() -> Uuid {
        Uuid::from_u128(0x1111_2222_3333_4444_5555_6666_7777_8888)
    }

    fn create_test_job() -> JobEntry {
        let mut job = JobEntry::new(7, "Texture Compile", "pc", builder(), JobStatus::Completed, 3);
        job.fingerprint = 42;
        job.last_log_file = "logs/hero.log".to_string();
        job
    }

    #[test]
    fn test_scan_folder_equality_uses_portable_key_only() {
        let mut first = ScanFolderEntry::new("/work/assets", "Assets", "root");
        first.id = 1;
        let mut second = ScanFolderEntry::new("/elsewhere/assets", "Other name", "root");
        second.id = 2;
        second.is_root = true;

        assert_eq!(first, second);

        let third = ScanFolderEntry::new("/work/assets", "Assets", "gems");
        assert_ne!(first, third);
    }

    #[test]
    fn test_job_equality_ignores_id_and_case() {
        let job = create_test_job();
        let mut other = create_test_job();
        other.id = 99;
        other.job_key = "TEXTURE COMPILE".to_string();
        other.platform = "PC".to_string();
        other.last_log_file = "LOGS/HERO.LOG".to_string();
        assert_eq!(job, other);

        other.status = JobStatus::Failed;
        assert_ne!(job, other);
    }

    #[test]
    fn test_product_equality_excludes_legacy_guid() {
        let asset_type = Uuid::from_u128(0xabc);
        let mut product = ProductEntry::new(3, 0, "hero.actor", asset_type);
        product.legacy_guid = Uuid::from_u128(1);
        let mut other = ProductEntry::new(3, 0, "HERO.actor", asset_type);
        other.id = 12;
        other.legacy_guid = Uuid::from_u128(2);
        assert_eq!(product, other);

        other.sub_id = 1;
        assert_ne!(product, other);
    }

    #[test]
    fn test_product_dependency_equality_ignores_id() {
        let guid = Uuid::from_u128(5);
        let mut dep = ProductDependencyEntry::new(1, guid, 2, 0b101);
        dep.id = 4;
        assert_eq!(dep, ProductDependencyEntry::new(1, guid, 2, 0b101));
        assert_ne!(dep, ProductDependencyEntry::new(1, guid, 2, 0b100));
    }

    #[test]
    fn test_job_status_round_trips_stored_values() {
        for status in JobStatus::STORED {
            assert_eq!(JobStatus::try_from(status.as_i64()), Ok(status));
        }
        assert_eq!(JobStatus::Any.as_i64(), -1);
        assert!(JobStatus::try_from(17).is_err());
        assert_eq!("In-Progress".parse::<JobStatus>(), Ok(JobStatus::InProgress));
        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn test_default_filter_accepts_everything() {
        let filter = JobFilter::any();
        assert!(!filter.filters_rows());
        assert_eq!(filter.platform(), None);
        assert!(filter.accepts_job(&create_test_job()));

        // Empty and nil values are "unset" too.
        let filter = JobFilter::any()
            .with_job_key("")
            .with_platform("")
            .with_builder_guid(Uuid::nil());
        assert!(!filter.filters_rows());
        assert_eq!(filter.platform(), None);
    }

    #[test]
    fn test_filter_checks_are_combined() {
        let job = create_test_job();

        let filter = JobFilter::any()
            .with_job_key("texture compile")
            .with_status(JobStatus::Completed);
        assert!(filter.accepts_job(&job));

        let wrong_builder = filter.clone().with_builder_guid(Uuid::from_u128(9));
        assert!(!wrong_builder.accepts_job(&job));

        let wrong_status = JobFilter::any()
            .with_builder_guid(builder())
            .with_status(JobStatus::Queued);
        assert!(!wrong_status.accepts_job(&job));

        let wrong_key = JobFilter::any().with_job_key("Mesh");
        assert!(!wrong_key.accepts_job(&job));
    }

    #[test]
    fn test_database_version_display() {
        assert_eq!(DatabaseVersion::CURRENT.to_string(), "8 (ClearAutoSucceedJobs)");
        assert_eq!(DatabaseVersion(42).to_string(), "42 (unknown)");
        assert!(DatabaseVersion::ADDED_JOB_KEY_INDEX < DatabaseVersion::CURRENT);
    }

    #[test]
    fn test_job_serializes_for_json_output() {
        let job = JobEntry::new(3, "Actor Compile", "pc", builder(), JobStatus::InProgress, 9);
        let value = serde_json::to_value(&job).expect("Failed to serialize job");

        assert_eq!(value["status"], "in_progress");
        assert_eq!(value["job_run_key"], 9);
        assert_eq!(value["builder_guid"], "11112222-3333-4444-5555-666677778888");
    }
}
