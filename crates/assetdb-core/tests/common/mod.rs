#![allow(dead_code)]

use assetdb_core::{
    AssetDatabaseConnection, ConnectionBuilder, JobEntry, JobStatus, OpenMode, ProductEntry,
    ScanFolderEntry, SourceEntry,
};
use tempfile::TempDir;
use uuid::Uuid;

pub const TEXTURE_BUILDER: Uuid = Uuid::from_u128(0x8a1f_0000_0000_0000_0000_0000_0000_0001);
pub const MESH_BUILDER: Uuid = Uuid::from_u128(0x8a1f_0000_0000_0000_0000_0000_0000_0002);
pub const ACTOR_TYPE: Uuid = Uuid::from_u128(0x7e57_0000_0000_0000_0000_0000_0000_00a1);
pub const TEXTURE_TYPE: Uuid = Uuid::from_u128(0x7e57_0000_0000_0000_0000_0000_0000_00a2);

/// Helper function to create an empty read-write database for testing
pub fn create_test_db() -> (TempDir, AssetDatabaseConnection) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("cache").join("assetdb.sqlite");
    let db = ConnectionBuilder::new()
        .with_database_path(Some(&db_path))
        .with_mode(OpenMode::ReadWrite)
        .open()
        .expect("Failed to open test database");
    (temp_dir, db)
}

pub fn add_scan_folder(
    db: &AssetDatabaseConnection,
    path: &str,
    display_name: &str,
    portable_key: &str,
) -> ScanFolderEntry {
    let mut entry = ScanFolderEntry::new(path, display_name, portable_key);
    db.set_scan_folder(&mut entry)
        .expect("Failed to add scan folder");
    entry
}

pub fn add_source(
    db: &AssetDatabaseConnection,
    scan_folder_id: i64,
    name: &str,
    guid: Uuid,
) -> SourceEntry {
    let mut entry = SourceEntry::new(scan_folder_id, name, guid);
    db.set_source(&mut entry).expect("Failed to add source");
    entry
}

pub fn add_job(
    db: &AssetDatabaseConnection,
    source_id: i64,
    job_key: &str,
    platform: &str,
    status: JobStatus,
    job_run_key: u64,
) -> JobEntry {
    let mut entry = JobEntry::new(source_id, job_key, platform, TEXTURE_BUILDER, status, job_run_key);
    db.set_job(&mut entry).expect("Failed to add job");
    entry
}

pub fn add_product(
    db: &AssetDatabaseConnection,
    job_id: i64,
    sub_id: u32,
    name: &str,
    asset_type: Uuid,
) -> ProductEntry {
    let mut entry = ProductEntry::new(job_id, sub_id, name, asset_type);
    db.set_product(&mut entry).expect("Failed to add product");
    entry
}

/// The rows every query test starts from.
///
/// `chars/hero.fbx` in scan folder `assets/` (portable key `root`) was
/// processed for pc (completed, fingerprint 42) and for android (failed).
/// The pc job produced `hero.actor`; the android job produced nothing.
/// `textures/hero.dds` in the same folder has one completed pc job that
/// produced `hero.dds.streamingimage`.
pub struct Scenario {
    pub temp_dir: TempDir,
    pub db: AssetDatabaseConnection,
    pub scan_folder: ScanFolderEntry,
    pub hero_source: SourceEntry,
    pub hero_pc_job: JobEntry,
    pub hero_android_job: JobEntry,
    pub hero_product: ProductEntry,
    pub texture_source: SourceEntry,
    pub texture_job: JobEntry,
    pub texture_product: ProductEntry,
}

pub const HERO_GUID: Uuid = Uuid::from_u128(0x6001);
pub const TEXTURE_GUID: Uuid = Uuid::from_u128(0x6002);

pub fn create_scenario() -> Scenario {
    let (temp_dir, db) = create_test_db();

    let scan_folder = add_scan_folder(&db, "/work/project/assets/", "assets/", "root");
    let hero_source = add_source(&db, scan_folder.id, "chars/hero.fbx", HERO_GUID);

    let mut hero_pc_job = JobEntry::new(
        hero_source.id,
        "Actor Compile",
        "pc",
        MESH_BUILDER,
        JobStatus::Completed,
        1,
    );
    hero_pc_job.fingerprint = 42;
    hero_pc_job.last_log_time = 1_700_000_000_000;
    hero_pc_job.last_log_file = "logs/hero_pc.log".to_string();
    db.set_job(&mut hero_pc_job).expect("Failed to add pc job");

    let mut hero_android_job = JobEntry::new(
        hero_source.id,
        "Actor Compile",
        "android",
        MESH_BUILDER,
        JobStatus::Failed,
        2,
    );
    hero_android_job.first_fail_log_time = 1_700_000_100_000;
    hero_android_job.first_fail_log_file = "logs/hero_android_fail.log".to_string();
    db.set_job(&mut hero_android_job)
        .expect("Failed to add android job");

    let hero_product = add_product(&db, hero_pc_job.id, 0, "hero.actor", ACTOR_TYPE);

    let texture_source = add_source(&db, scan_folder.id, "textures/hero.dds", TEXTURE_GUID);
    let texture_job = add_job(
        &db,
        texture_source.id,
        "Image Compile",
        "pc",
        JobStatus::Completed,
        3,
    );
    let texture_product = add_product(
        &db,
        texture_job.id,
        1000,
        "hero.dds.streamingimage",
        TEXTURE_TYPE,
    );

    Scenario {
        temp_dir,
        db,
        scan_folder,
        hero_source,
        hero_pc_job,
        hero_android_job,
        hero_product,
        texture_source,
        texture_job,
        texture_product,
    }
}
