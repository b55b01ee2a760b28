use assetdb_core::{
    AssetDatabaseConnection, AssetId, JobStatus, ProductDependencyEntry, ProductEntry,
    SourceFileDependencyEntry,
};
use uuid::Uuid;

mod common;

use common::{add_job, add_product, add_scan_folder, add_source, create_test_db, ACTOR_TYPE};

const GUID_A: Uuid = Uuid::from_u128(0xa0);
const GUID_B: Uuid = Uuid::from_u128(0xb0);
const GUID_C: Uuid = Uuid::from_u128(0xc0);
const LEGACY_GUID: Uuid = Uuid::from_u128(0x1e6a);

/// One source with one completed pc job and one product.
fn add_asset(db: &AssetDatabaseConnection, name: &str, guid: Uuid, sub_id: u32) -> ProductEntry {
    let folder = add_scan_folder(db, "/work/assets", "assets/", "root");
    let source = add_source(db, folder.id, name, guid);
    let run_key = db.highest_job_run_key().expect("Failed to read run key") + 1;
    let job = add_job(db, source.id, "Compile", "pc", JobStatus::Completed, run_key);
    add_product(db, job.id, sub_id, &format!("{name}.product"), ACTOR_TYPE)
}

fn depend(db: &AssetDatabaseConnection, product: &ProductEntry, guid: Uuid, sub_id: u32) {
    let mut dependency = ProductDependencyEntry::new(product.id, guid, sub_id, 0);
    db.set_product_dependency(&mut dependency)
        .expect("Failed to add product dependency");
}

fn all_dependencies(db: &AssetDatabaseConnection, product_id: i64) -> Vec<i64> {
    let mut ids = Vec::new();
    db.query_all_product_dependencies(product_id, |product| {
        ids.push(product.id);
        true
    })
    .expect("Failed to query all dependencies");
    ids.sort();
    ids
}

fn direct_dependencies(db: &AssetDatabaseConnection, product_id: i64) -> Vec<i64> {
    let mut ids = Vec::new();
    db.query_direct_product_dependencies(product_id, |product| {
        ids.push(product.id);
        true
    })
    .expect("Failed to query direct dependencies");
    ids.sort();
    ids
}

#[test]
fn test_all_dependencies_follow_the_chain() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 0);
    let b = add_asset(&db, "b.fbx", GUID_B, 0);
    let c = add_asset(&db, "c.fbx", GUID_C, 0);
    depend(&db, &a, GUID_B, 0);
    depend(&db, &b, GUID_C, 0);

    assert_eq!(direct_dependencies(&db, a.id), vec![b.id]);
    assert_eq!(all_dependencies(&db, a.id), vec![b.id, c.id]);
    assert_eq!(all_dependencies(&db, b.id), vec![c.id]);
    assert!(all_dependencies(&db, c.id).is_empty());
}

#[test]
fn test_dependencies_match_source_guid_and_sub_id() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 0);
    let b = add_asset(&db, "b.fbx", GUID_B, 5);
    // Same guid, other sub id: not the target
    depend(&db, &a, GUID_B, 6);
    assert!(direct_dependencies(&db, a.id).is_empty());

    depend(&db, &a, GUID_B, 5);
    assert_eq!(direct_dependencies(&db, a.id), vec![b.id]);
}

#[test]
fn test_dependencies_match_legacy_guid() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 0);
    let mut b = add_asset(&db, "b.fbx", GUID_B, 3);
    b.legacy_guid = LEGACY_GUID;
    db.set_product(&mut b).expect("Failed to set legacy guid");

    depend(&db, &a, LEGACY_GUID, 3);
    assert_eq!(direct_dependencies(&db, a.id), vec![b.id]);
    assert_eq!(all_dependencies(&db, a.id), vec![b.id]);

    let mut delivered: Vec<ProductEntry> = Vec::new();
    db.query_direct_product_dependencies(a.id, |product| {
        delivered.push(product.clone());
        true
    })
    .expect("Failed to query direct dependencies");
    assert_eq!(delivered[0].legacy_guid, LEGACY_GUID);
}

#[test]
fn test_long_chains_are_followed_to_the_end() {
    let (_temp_dir, db) = create_test_db();
    let guids: Vec<Uuid> = (0..70).map(|i| Uuid::from_u128(0x1000 + i)).collect();
    let products: Vec<ProductEntry> = guids
        .iter()
        .enumerate()
        .map(|(i, guid)| add_asset(&db, &format!("chain/{i}.fbx"), *guid, 0))
        .collect();
    for (product, next_guid) in products.iter().zip(&guids[1..]) {
        depend(&db, product, *next_guid, 0);
    }

    let mut expected: Vec<i64> = products[1..].iter().map(|p| p.id).collect();
    expected.sort();
    assert_eq!(all_dependencies(&db, products[0].id), expected);

    // Closing the loop reaches every other product from anywhere on it
    depend(&db, &products[69], guids[0], 0);
    let middle = &products[35];
    let mut expected: Vec<i64> = products
        .iter()
        .filter(|p| p.id != middle.id)
        .map(|p| p.id)
        .collect();
    expected.sort();
    assert_eq!(all_dependencies(&db, middle.id), expected);
}

#[test]
fn test_cycles_terminate_without_duplicates() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 0);
    let b = add_asset(&db, "b.fbx", GUID_B, 0);
    let c = add_asset(&db, "c.fbx", GUID_C, 0);
    depend(&db, &a, GUID_B, 0);
    depend(&db, &b, GUID_C, 0);
    depend(&db, &c, GUID_A, 0);
    // A self-reference as well
    depend(&db, &b, GUID_B, 0);

    assert_eq!(all_dependencies(&db, a.id), vec![b.id, c.id]);
    assert_eq!(all_dependencies(&db, b.id), vec![a.id, c.id]);
}

#[test]
fn test_all_dependencies_can_stop_early() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 0);
    add_asset(&db, "b.fbx", GUID_B, 0);
    add_asset(&db, "c.fbx", GUID_C, 0);
    depend(&db, &a, GUID_B, 0);
    depend(&db, &a, GUID_C, 0);

    let mut calls = 0;
    db.query_all_product_dependencies(a.id, |_| {
        calls += 1;
        false
    })
    .expect("Stopping early is still a success");
    assert_eq!(calls, 1);
}

#[test]
fn test_product_dependency_rows() {
    let (_temp_dir, db) = create_test_db();
    let a = add_asset(&db, "a.fbx", GUID_A, 2);
    let flags = 0x8000_0000_0000_0001;
    let mut dependency = ProductDependencyEntry::new(a.id, GUID_B, 9, flags);
    db.set_product_dependency(&mut dependency)
        .expect("Failed to add product dependency");
    assert!(dependency.id > 0);

    let mut by_id: Vec<ProductDependencyEntry> = Vec::new();
    db.query_product_dependency_by_product_dependency_id(dependency.id, |entry| {
        by_id.push(entry.clone());
        true
    })
    .expect("Failed to query dependency by id");
    assert_eq!(by_id, vec![dependency.clone()]);
    assert_eq!(by_id[0].dependency_flags, flags);
    assert_eq!(by_id[0].target(), AssetId::new(GUID_B, 9));

    let mut by_product = 0;
    db.query_product_dependency_by_product_id(a.id, |entry| {
        assert_eq!(entry.product_id, a.id);
        by_product += 1;
        true
    })
    .expect("Failed to query dependencies by product");
    assert_eq!(by_product, 1);

    // The table scan also reports the owning product's asset id
    let mut owners = Vec::new();
    db.query_product_dependencies_table(|owner, entry| {
        owners.push((*owner, entry.id));
        true
    })
    .expect("Failed to scan product dependencies");
    assert_eq!(owners, vec![(AssetId::new(GUID_A, 2), dependency.id)]);
}

#[test]
fn test_source_dependencies() {
    let (_temp_dir, db) = create_test_db();
    let builder = Uuid::from_u128(0xbb);
    let other_builder = Uuid::from_u128(0xcc);
    for (builder_guid, source, depends_on) in [
        (builder, "materials/hero.material", "textures/hero.dds"),
        (builder, "materials/hero.material", "shaders/standard.shader"),
        (builder, "materials/villain.material", "textures/hero.dds"),
        (other_builder, "levels/town.level", "textures/hero.dds"),
    ] {
        let mut entry = SourceFileDependencyEntry::new(builder_guid, source, depends_on);
        db.set_source_file_dependency(&mut entry)
            .expect("Failed to add source dependency");
    }

    let mut exact: Vec<SourceFileDependencyEntry> = Vec::new();
    db.query_source_dependency(builder, "materials/hero.material", "textures/hero.dds", |e| {
        exact.push(e.clone());
        true
    })
    .expect("Failed to query exact dependency");
    assert_eq!(exact.len(), 1);

    let mut by_id = Vec::new();
    db.query_source_dependency_by_source_dependency_id(exact[0].id, |e| {
        by_id.push(e.clone());
        true
    })
    .expect("Failed to query dependency by id");
    assert_eq!(by_id, exact);

    let mut dependents = Vec::new();
    db.query_source_dependency_by_depends_on_source("textures/hero.dds", None, |e| {
        dependents.push(e.source.clone());
        true
    })
    .expect("Failed to query dependents");
    dependents.sort();
    assert_eq!(
        dependents,
        vec![
            "levels/town.level".to_string(),
            "materials/hero.material".to_string(),
            "materials/villain.material".to_string()
        ]
    );

    let mut materials = 0;
    db.query_source_dependency_by_depends_on_source(
        "textures/hero.dds",
        Some("materials/%"),
        |_| {
            materials += 1;
            true
        },
    )
    .expect("Failed to query filtered dependents");
    assert_eq!(materials, 2);

    let mut shaders = Vec::new();
    db.query_depends_on_source_by_source_dependency(
        "materials/hero.material",
        Some("%.shader"),
        |e| {
            shaders.push(e.depends_on_source.clone());
            true
        },
    )
    .expect("Failed to query dependencies of a source");
    assert_eq!(shaders, vec!["shaders/standard.shader".to_string()]);

    let mut for_builder = 0;
    db.query_source_dependency_by_builder_guid_and_source(
        other_builder,
        "levels/town.level",
        |e| {
            assert_eq!(e.builder_guid, other_builder);
            for_builder += 1;
            true
        },
    )
    .expect("Failed to query dependencies by builder");
    assert_eq!(for_builder, 1);
}
