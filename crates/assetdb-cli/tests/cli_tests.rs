use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assetdb_core::{
    ConnectionBuilder, JobEntry, JobStatus, OpenMode, ProductDependencyEntry, ProductEntry,
    ScanFolderEntry, SourceEntry, SourceFileDependencyEntry,
};
use predicates::prelude::*;
use tempfile::TempDir;
use uuid::Uuid;

const BUILDER: Uuid = Uuid::from_u128(0xb111);
const HERO_GUID: Uuid = Uuid::from_u128(0x6001);
const TEXTURE_GUID: Uuid = Uuid::from_u128(0x6002);

struct Fixture {
    _temp_dir: TempDir,
    db_path: PathBuf,
    hero_product_id: i64,
    texture_product_id: i64,
}

/// Helper function to build a small database for CLI tests
///
/// `chars/hero.fbx` has a completed pc job producing `hero.actor`, which
/// depends on `hero.dds.streamingimage` from `textures/hero.dds`. An android
/// job for the hero failed.
fn create_fixture() -> Fixture {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("assetdb.sqlite");
    let db = ConnectionBuilder::new()
        .with_database_path(Some(&db_path))
        .with_mode(OpenMode::ReadWrite)
        .open()
        .expect("Failed to create fixture database");

    let mut folder = ScanFolderEntry::new("/work/project/assets/", "assets/", "root");
    db.set_scan_folder(&mut folder)
        .expect("Failed to add scan folder");

    let mut hero = SourceEntry::new(folder.id, "chars/hero.fbx", HERO_GUID);
    db.set_source(&mut hero).expect("Failed to add source");
    let mut texture = SourceEntry::new(folder.id, "textures/hero.dds", TEXTURE_GUID);
    db.set_source(&mut texture).expect("Failed to add source");

    let mut hero_pc = JobEntry::new(hero.id, "Actor Compile", "pc", BUILDER, JobStatus::Completed, 1);
    hero_pc.last_log_time = 1_700_000_000_000;
    hero_pc.last_log_file = "logs/hero_pc.log".to_string();
    db.set_job(&mut hero_pc).expect("Failed to add job");
    let mut hero_android =
        JobEntry::new(hero.id, "Actor Compile", "android", BUILDER, JobStatus::Failed, 2);
    db.set_job(&mut hero_android).expect("Failed to add job");
    let mut texture_pc =
        JobEntry::new(texture.id, "Image Compile", "pc", BUILDER, JobStatus::Completed, 3);
    db.set_job(&mut texture_pc).expect("Failed to add job");

    let mut hero_product = ProductEntry::new(hero_pc.id, 0, "hero.actor", Uuid::from_u128(0xa1));
    db.set_product(&mut hero_product)
        .expect("Failed to add product");
    let mut texture_product = ProductEntry::new(
        texture_pc.id,
        1000,
        "hero.dds.streamingimage",
        Uuid::from_u128(0xa2),
    );
    db.set_product(&mut texture_product)
        .expect("Failed to add product");

    let mut dependency = ProductDependencyEntry::new(hero_product.id, TEXTURE_GUID, 1000, 0);
    db.set_product_dependency(&mut dependency)
        .expect("Failed to add product dependency");

    let mut source_dependency =
        SourceFileDependencyEntry::new(BUILDER, "materials/hero.material", "textures/hero.dds");
    db.set_source_file_dependency(&mut source_dependency)
        .expect("Failed to add source dependency");

    Fixture {
        _temp_dir: temp_dir,
        db_path,
        hero_product_id: hero_product.id,
        texture_product_id: texture_product.id,
    }
}

/// Helper function to create a Command with --no-color and the database set
fn assetdb_cmd(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("assetdb").expect("Failed to find assetdb binary");
    cmd.arg("--no-color")
        .arg("--database-file")
        .arg(db_path);
    cmd
}

#[test]
fn test_cli_info_shows_version() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Asset database"))
        .stdout(predicate::str::contains("8 (ClearAutoSucceedJobs)"));
}

#[test]
fn test_cli_defaults_to_info() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("**Version:**"));
}

#[test]
fn test_cli_lists_scan_folders() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .arg("scan-folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. **assets/** `/work/project/assets/`"));
}

#[test]
fn test_cli_searches_sources() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["sources", "--like", "chars/"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chars/hero.fbx"))
        .stdout(predicate::str::contains("textures/hero.dds").not());

    assetdb_cmd(&fixture.db_path)
        .args(["sources", "--like", ".dds", "--match-type", "ends-with"])
        .assert()
        .success()
        .stdout(predicate::str::contains("textures/hero.dds"))
        .stdout(predicate::str::contains("chars/hero.fbx").not());
}

#[test]
fn test_cli_filters_jobs() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["jobs", "--status", "failed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on `android`: failed"))
        .stdout(predicate::str::contains("on `pc`").not());

    assetdb_cmd(&fixture.db_path)
        .args(["jobs", "--platform", "pc", "--job-key", "image compile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Image Compile** on `pc`: completed"))
        .stdout(predicate::str::contains("Actor Compile").not());
}

#[test]
fn test_cli_jobs_for_source_show_log_times() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["jobs", "--source", "chars/hero.fbx", "--platform", "pc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("in `/work/project/assets/`"))
        .stdout(predicate::str::contains(
            "last log 2023-11-14T22:13:20Z `logs/hero_pc.log`",
        ));
}

#[test]
fn test_cli_products_for_source_and_platform() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["products", "--source", "chars/hero.fbx", "--platform", "pc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`hero.actor`"));

    assetdb_cmd(&fixture.db_path)
        .args(["products", "--source", "chars/hero.fbx", "--platform", "android"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No products found."));
}

#[test]
fn test_cli_products_as_json() {
    let fixture = create_fixture();

    let output = assetdb_cmd(&fixture.db_path)
        .args(["--json", "products", "--like", "hero.dds", "--match-type", "starts-with"])
        .output()
        .expect("Failed to run assetdb");
    assert!(output.status.success());

    let products: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Output should be JSON");
    let products = products.as_array().expect("Output should be an array");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "hero.dds.streamingimage");
    assert_eq!(products[0]["sub_id"], 1000);
    assert_eq!(products[0]["id"], fixture.texture_product_id);
}

#[test]
fn test_cli_shows_product_dependencies() {
    let fixture = create_fixture();
    let product_id = fixture.hero_product_id.to_string();

    assetdb_cmd(&fixture.db_path)
        .args(["deps", product_id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("hero.dds.streamingimage"));

    assetdb_cmd(&fixture.db_path)
        .args(["deps", product_id.as_str(), "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# All dependencies of product"))
        .stdout(predicate::str::contains("hero.dds.streamingimage"));

    let texture_id = fixture.texture_product_id.to_string();
    assetdb_cmd(&fixture.db_path)
        .args(["deps", texture_id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies found."));
}

#[test]
fn test_cli_shows_source_dependencies() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["source-deps", "materials/hero.material"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`textures/hero.dds`"));

    assetdb_cmd(&fixture.db_path)
        .args(["source-deps", "textures/hero.dds", "--reverse"])
        .assert()
        .success()
        .stdout(predicate::str::contains("`materials/hero.material`"));
}

#[test]
fn test_cli_missing_database_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("missing.sqlite");

    assetdb_cmd(&db_path)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open asset database"));
    assert!(!db_path.exists());
}

#[test]
fn test_cli_rejects_unknown_status() {
    let fixture = create_fixture();

    assetdb_cmd(&fixture.db_path)
        .args(["jobs", "--status", "sleeping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
