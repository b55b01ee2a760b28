//! Dependency edges between sources and between products.

use serde::Serialize;
use uuid::Uuid;

/// Identity of a product as referenced by other products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AssetId {
    /// Guid of the source that emitted the product (or its legacy guid)
    pub guid: Uuid,
    pub sub_id: u32,
}

impl AssetId {
    pub fn new(guid: Uuid, sub_id: u32) -> Self {
        Self { guid, sub_id }
    }
}

/// A product's declared dependency on another product.
///
/// The target is named by `(dependency_source_guid, dependency_sub_id)` and
/// may not exist in the store. Equality ignores the id.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDependencyEntry {
    pub id: i64,
    pub product_id: i64,
    pub dependency_source_guid: Uuid,
    pub dependency_sub_id: u32,
    /// Opaque bitset
    pub dependency_flags: u64,
}

impl ProductDependencyEntry {
    pub fn new(
        product_id: i64,
        dependency_source_guid: Uuid,
        dependency_sub_id: u32,
        dependency_flags: u64,
    ) -> Self {
        Self {
            id: -1,
            product_id,
            dependency_source_guid,
            dependency_sub_id,
            dependency_flags,
        }
    }

    pub fn target(&self) -> AssetId {
        AssetId::new(self.dependency_source_guid, self.dependency_sub_id)
    }
}

impl PartialEq for ProductDependencyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.product_id == other.product_id
            && self.dependency_source_guid == other.dependency_source_guid
            && self.dependency_sub_id == other.dependency_sub_id
            && self.dependency_flags == other.dependency_flags
    }
}

impl Eq for ProductDependencyEntry {}

/// "`source` depends on `depends_on_source`", as declared by a builder.
///
/// Both ends are names, not foreign keys.
#[derive(Debug, Clone, Serialize)]
pub struct SourceFileDependencyEntry {
    pub id: i64,
    pub builder_guid: Uuid,
    pub source: String,
    pub depends_on_source: String,
}

impl SourceFileDependencyEntry {
    pub fn new(
        builder_guid: Uuid,
        source: impl Into<String>,
        depends_on_source: impl Into<String>,
    ) -> Self {
        Self {
            id: -1,
            builder_guid,
            source: source.into(),
            depends_on_source: depends_on_source.into(),
        }
    }
}

impl PartialEq for SourceFileDependencyEntry {
    fn eq(&self, other: &Self) -> bool {
        self.builder_guid == other.builder_guid
            && self.source.eq_ignore_ascii_case(&other.source)
            && self.depends_on_source.eq_ignore_ascii_case(&other.depends_on_source)
    }
}

impl Eq for SourceFileDependencyEntry {}
