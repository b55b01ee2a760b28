//! Source file and product dependency lookups.

use log::warn;
use uuid::Uuid;

use super::{
    columns::{
        OwnedProductDependencyColumns, ProductColumns, ProductDependencyColumns,
        SourceDependencyColumns,
    },
    statements::{StatementId, MAX_DEPENDENCY_ROWS},
};
use crate::{
    error::Result,
    models::{AssetId, ProductDependencyEntry, ProductEntry, SourceFileDependencyEntry},
};

/// A missing or empty LIKE filter matches everything.
fn like_filter_or_any(filter: Option<&str>) -> &str {
    filter.filter(|f| !f.is_empty()).unwrap_or("%")
}

impl super::AssetDatabaseConnection {
    /// The dependency rows exactly matching all three fields.
    pub fn query_source_dependency<F>(
        &self,
        builder_guid: Uuid,
        source: &str,
        depends_on_source: &str,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceFileDependencyEntry) -> bool,
    {
        self.query(StatementId::SourceDependencyByExact)?
            .bind(":builderguid", builder_guid)?
            .bind(":source", source)?
            .bind(":dependsonsource", depends_on_source)?
            .rows::<SourceDependencyColumns, _>(None, handler)
    }

    pub fn query_source_dependency_by_source_dependency_id<F>(
        &self,
        source_dependency_id: i64,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceFileDependencyEntry) -> bool,
    {
        self.query(StatementId::SourceDependencyById)?
            .bind(":sourcedependencyid", source_dependency_id)?
            .rows::<SourceDependencyColumns, _>(None, handler)
    }

    /// What depends on `depends_on_source`, with dependents narrowed by a
    /// LIKE pattern.
    pub fn query_source_dependency_by_depends_on_source<F>(
        &self,
        depends_on_source: &str,
        dependent_filter: Option<&str>,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceFileDependencyEntry) -> bool,
    {
        self.query(StatementId::SourceDependenciesByDependsOnSource)?
            .bind(":dependsonsource", depends_on_source)?
            .bind(":dependentfilter", like_filter_or_any(dependent_filter))?
            .rows::<SourceDependencyColumns, _>(None, handler)
    }

    /// What `source` depends on, with dependencies narrowed by a LIKE
    /// pattern.
    pub fn query_depends_on_source_by_source_dependency<F>(
        &self,
        source: &str,
        dependency_filter: Option<&str>,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceFileDependencyEntry) -> bool,
    {
        self.query(StatementId::SourceDependenciesBySource)?
            .bind(":source", source)?
            .bind(":dependencyfilter", like_filter_or_any(dependency_filter))?
            .rows::<SourceDependencyColumns, _>(None, handler)
    }

    pub fn query_source_dependency_by_builder_guid_and_source<F>(
        &self,
        builder_guid: Uuid,
        source: &str,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut SourceFileDependencyEntry) -> bool,
    {
        self.query(StatementId::SourceDependenciesByBuilderGuidSource)?
            .bind(":builderguid", builder_guid)?
            .bind(":source", source)?
            .rows::<SourceDependencyColumns, _>(None, handler)
    }

    /// Every product dependency, together with the identity of the product
    /// that declares it.
    pub fn query_product_dependencies_table<F>(&self, mut handler: F) -> Result<()>
    where
        F: FnMut(&AssetId, &mut ProductDependencyEntry) -> bool,
    {
        self.query(StatementId::ProductDependencies)?
            .rows::<OwnedProductDependencyColumns, _>(None, |(owner, dependency)| {
                handler(owner, dependency)
            })
    }

    pub fn query_product_dependency_by_product_dependency_id<F>(
        &self,
        product_dependency_id: i64,
        handler: F,
    ) -> Result<()>
    where
        F: FnMut(&mut ProductDependencyEntry) -> bool,
    {
        self.query(StatementId::ProductDependencyById)?
            .bind(":productdependencyid", product_dependency_id)?
            .rows::<ProductDependencyColumns, _>(None, handler)
    }

    pub fn query_product_dependency_by_product_id<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductDependencyEntry) -> bool,
    {
        self.query(StatementId::ProductDependenciesByProductId)?
            .bind(":productid", product_id)?
            .rows::<ProductDependencyColumns, _>(None, handler)
    }

    /// Products that `product_id` depends on directly.
    ///
    /// A dependency resolves to a product whose source guid, or whose own
    /// legacy guid, equals the dependency's guid, with a matching sub id.
    /// Dependencies on products that do not exist yet are not reported.
    pub fn query_direct_product_dependencies<F>(&self, product_id: i64, handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        self.query(StatementId::DirectProductDependencies)?
            .bind(":productid", product_id)?
            .rows::<ProductColumns, _>(None, handler)
    }

    /// Every product reachable from `product_id` through dependencies,
    /// excluding `product_id` itself.
    ///
    /// Each product is reported once, even when the graph has cycles or
    /// several paths lead to it; a product already reached is never expanded
    /// again, so chains of any length are followed to the end. At most
    /// [`MAX_DEPENDENCY_ROWS`] products are reported.
    pub fn query_all_product_dependencies<F>(&self, product_id: i64, mut handler: F) -> Result<()>
    where
        F: FnMut(&mut ProductEntry) -> bool,
    {
        let mut reported = 0_i64;
        self.query(StatementId::AllProductDependencies)?
            .bind(":productid", product_id)?
            .bind(":maxrows", MAX_DEPENDENCY_ROWS + 1)?
            .rows::<ProductColumns, _>(None, |product| {
                reported += 1;
                handler(product)
            })?;
        if reported >= MAX_DEPENDENCY_ROWS {
            warn!(
                "Dependencies of product {product_id} reached the limit of {MAX_DEPENDENCY_ROWS} rows"
            );
        }
        Ok(())
    }
}
