//! Catalog of every read statement.
//!
//! Each [`StatementId`] has a stable diagnostic name, its SQL text and the
//! tables it touches. Queries that can be narrowed to a platform come in
//! pairs; [`StatementId::with_platform`] picks the narrowed twin.

const DBINFO_TABLE: &str = "dbinfo";
const SCAN_FOLDERS_TABLE: &str = "ScanFolders";
const SOURCES_TABLE: &str = "Sources";
const JOBS_TABLE: &str = "Jobs";
const PRODUCTS_TABLE: &str = "Products";
const LEGACY_SUB_IDS_TABLE: &str = "LegacySubIDs";
const SOURCE_DEPENDENCY_TABLE: &str = "SourceDependency";
const PRODUCT_DEPENDENCIES_TABLE: &str = "ProductDependencies";

/// Most products the all-dependencies walk reports.
pub const MAX_DEPENDENCY_ROWS: i64 = 100_000;

const COMBINED_TABLES: &[&str] = &[SCAN_FOLDERS_TABLE, SOURCES_TABLE, JOBS_TABLE, PRODUCTS_TABLE];
const JOB_PRODUCT_TABLES: &[&str] = &[JOBS_TABLE, PRODUCTS_TABLE];
const SOURCE_JOB_PRODUCT_TABLES: &[&str] = &[SOURCES_TABLE, JOBS_TABLE, PRODUCTS_TABLE];
const DEPENDENCY_JOIN_TABLES: &[&str] = &[
    PRODUCT_DEPENDENCIES_TABLE,
    PRODUCTS_TABLE,
    JOBS_TABLE,
    SOURCES_TABLE,
];

macro_rules! products_sql {
    ($($tail:literal),*) => {
        concat!(
            "SELECT Products.*, Jobs.* FROM Jobs \
             INNER JOIN Products ON Products.JobPK = Jobs.JobID",
            $($tail),*
        )
    };
}

macro_rules! products_by_source_sql {
    ($($tail:literal),*) => {
        concat!(
            "SELECT Products.*, Jobs.* FROM Sources \
             INNER JOIN Jobs ON Jobs.SourcePK = Sources.SourceID \
             INNER JOIN Products ON Products.JobPK = Jobs.JobID",
            $($tail),*
        )
    };
}

macro_rules! combined_sql {
    ($($tail:literal),*) => {
        concat!(
            "SELECT * FROM ScanFolders \
             INNER JOIN Sources ON Sources.ScanFolderPK = ScanFolders.ScanFolderID \
             INNER JOIN Jobs ON Jobs.SourcePK = Sources.SourceID \
             INNER JOIN Products ON Products.JobPK = Jobs.JobID",
            $($tail),*
        )
    };
}

/// Products reached from `ProductDependencies` rows by either the source guid
/// of the product's job or the product's own legacy guid.
macro_rules! dependency_target_join {
    () => {
        " INNER JOIN Products ON Products.SubID = ProductDependencies.DependencySubID \
         INNER JOIN Jobs ON Jobs.JobID = Products.JobPK \
         INNER JOIN Sources ON Sources.SourceID = Jobs.SourcePK \
         AND (Sources.SourceGuid = ProductDependencies.DependencySourceGuid \
         OR Products.LegacyGuid = ProductDependencies.DependencySourceGuid)"
    };
}

// Rows carry no per-hop state, so UNION discards products already reached
// and the walk ends at the closure. The seed row counts against :maxrows.
const ALL_PRODUCT_DEPENDENCIES_SQL: &str = "WITH RECURSIVE \
     allProductDeps(ProductID, JobPK, ProductName, SubID, AssetType, LegacyGuid) AS ( \
         SELECT ProductID, JobPK, ProductName, SubID, AssetType, LegacyGuid \
         FROM Products WHERE ProductID = :productid \
         UNION \
         SELECT P.ProductID, P.JobPK, P.ProductName, P.SubID, P.AssetType, P.LegacyGuid \
         FROM allProductDeps \
         INNER JOIN ProductDependencies ON ProductDependencies.ProductPK = allProductDeps.ProductID \
         INNER JOIN Products P ON P.SubID = ProductDependencies.DependencySubID \
         INNER JOIN Jobs ON Jobs.JobID = P.JobPK \
         INNER JOIN Sources ON Sources.SourceID = Jobs.SourcePK \
         WHERE (Sources.SourceGuid = ProductDependencies.DependencySourceGuid \
                OR P.LegacyGuid = ProductDependencies.DependencySourceGuid) \
         LIMIT :maxrows \
     ) \
     SELECT DISTINCT ProductID, JobPK, ProductName, SubID, AssetType, LegacyGuid \
     FROM allProductDeps WHERE ProductID != :productid";

/// Identifies one read statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementId {
    DatabaseInfo,

    ScanFolders,
    ScanFolderById,
    ScanFolderByDisplayName,
    ScanFolderByPortableKey,

    Sources,
    SourceById,
    SourcesByScanFolderId,
    SourceByGuid,
    SourcesBySourceName,
    SourceBySourceNameScanFolderId,
    SourcesLikeSourceName,

    Jobs,
    JobsPlatform,
    JobById,
    JobsByJobKey,
    JobByJobRunKey,
    JobByProductId,
    JobsBySourceId,
    JobsBySourceIdPlatform,

    Products,
    ProductsPlatform,
    ProductById,
    ProductsByJobId,
    ProductsByJobIdPlatform,
    ProductsBySourceId,
    ProductsBySourceIdPlatform,
    ProductsByProductName,
    ProductsByProductNamePlatform,
    ProductsLikeProductName,
    ProductsLikeProductNamePlatform,
    ProductsBySourceName,
    ProductsBySourceNamePlatform,
    ProductsLikeSourceName,
    ProductsLikeSourceNamePlatform,

    LegacySubIdsByProductId,

    Combined,
    CombinedPlatform,
    CombinedBySourceId,
    CombinedBySourceIdPlatform,
    CombinedByJobId,
    CombinedByJobIdPlatform,
    CombinedByProductId,
    CombinedByProductIdPlatform,
    CombinedBySourceGuidProductSubId,
    CombinedBySourceGuidProductSubIdPlatform,
    CombinedBySourceName,
    CombinedBySourceNamePlatform,
    CombinedLikeSourceName,
    CombinedLikeSourceNamePlatform,
    CombinedByProductName,
    CombinedByProductNamePlatform,
    CombinedLikeProductName,
    CombinedLikeProductNamePlatform,

    SourceDependencyById,
    SourceDependencyByExact,
    SourceDependenciesByDependsOnSource,
    SourceDependenciesBySource,
    SourceDependenciesByBuilderGuidSource,

    ProductDependencies,
    ProductDependencyById,
    ProductDependenciesByProductId,
    DirectProductDependencies,
    AllProductDependencies,
}

impl StatementId {
    pub const ALL: [StatementId; 64] = [
        StatementId::DatabaseInfo,
        StatementId::ScanFolders,
        StatementId::ScanFolderById,
        StatementId::ScanFolderByDisplayName,
        StatementId::ScanFolderByPortableKey,
        StatementId::Sources,
        StatementId::SourceById,
        StatementId::SourcesByScanFolderId,
        StatementId::SourceByGuid,
        StatementId::SourcesBySourceName,
        StatementId::SourceBySourceNameScanFolderId,
        StatementId::SourcesLikeSourceName,
        StatementId::Jobs,
        StatementId::JobsPlatform,
        StatementId::JobById,
        StatementId::JobsByJobKey,
        StatementId::JobByJobRunKey,
        StatementId::JobByProductId,
        StatementId::JobsBySourceId,
        StatementId::JobsBySourceIdPlatform,
        StatementId::Products,
        StatementId::ProductsPlatform,
        StatementId::ProductById,
        StatementId::ProductsByJobId,
        StatementId::ProductsByJobIdPlatform,
        StatementId::ProductsBySourceId,
        StatementId::ProductsBySourceIdPlatform,
        StatementId::ProductsByProductName,
        StatementId::ProductsByProductNamePlatform,
        StatementId::ProductsLikeProductName,
        StatementId::ProductsLikeProductNamePlatform,
        StatementId::ProductsBySourceName,
        StatementId::ProductsBySourceNamePlatform,
        StatementId::ProductsLikeSourceName,
        StatementId::ProductsLikeSourceNamePlatform,
        StatementId::LegacySubIdsByProductId,
        StatementId::Combined,
        StatementId::CombinedPlatform,
        StatementId::CombinedBySourceId,
        StatementId::CombinedBySourceIdPlatform,
        StatementId::CombinedByJobId,
        StatementId::CombinedByJobIdPlatform,
        StatementId::CombinedByProductId,
        StatementId::CombinedByProductIdPlatform,
        StatementId::CombinedBySourceGuidProductSubId,
        StatementId::CombinedBySourceGuidProductSubIdPlatform,
        StatementId::CombinedBySourceName,
        StatementId::CombinedBySourceNamePlatform,
        StatementId::CombinedLikeSourceName,
        StatementId::CombinedLikeSourceNamePlatform,
        StatementId::CombinedByProductName,
        StatementId::CombinedByProductNamePlatform,
        StatementId::CombinedLikeProductName,
        StatementId::CombinedLikeProductNamePlatform,
        StatementId::SourceDependencyById,
        StatementId::SourceDependencyByExact,
        StatementId::SourceDependenciesByDependsOnSource,
        StatementId::SourceDependenciesBySource,
        StatementId::SourceDependenciesByBuilderGuidSource,
        StatementId::ProductDependencies,
        StatementId::ProductDependencyById,
        StatementId::ProductDependenciesByProductId,
        StatementId::DirectProductDependencies,
        StatementId::AllProductDependencies,
    ];

    /// The platform-narrowed twin, or `self` when there is none.
    pub fn with_platform(self) -> Self {
        use StatementId::*;
        match self {
            Jobs => JobsPlatform,
            JobsBySourceId => JobsBySourceIdPlatform,
            Products => ProductsPlatform,
            ProductsByJobId => ProductsByJobIdPlatform,
            ProductsBySourceId => ProductsBySourceIdPlatform,
            ProductsByProductName => ProductsByProductNamePlatform,
            ProductsLikeProductName => ProductsLikeProductNamePlatform,
            ProductsBySourceName => ProductsBySourceNamePlatform,
            ProductsLikeSourceName => ProductsLikeSourceNamePlatform,
            Combined => CombinedPlatform,
            CombinedBySourceId => CombinedBySourceIdPlatform,
            CombinedByJobId => CombinedByJobIdPlatform,
            CombinedByProductId => CombinedByProductIdPlatform,
            CombinedBySourceGuidProductSubId => CombinedBySourceGuidProductSubIdPlatform,
            CombinedBySourceName => CombinedBySourceNamePlatform,
            CombinedLikeSourceName => CombinedLikeSourceNamePlatform,
            CombinedByProductName => CombinedByProductNamePlatform,
            CombinedLikeProductName => CombinedLikeProductNamePlatform,
            other => other,
        }
    }

    /// Picks the platform twin when `platform` is set.
    pub fn for_platform(self, platform: Option<&str>) -> Self {
        match platform {
            Some(_) => self.with_platform(),
            None => self,
        }
    }

    /// Stable name used in diagnostics.
    pub fn name(self) -> &'static str {
        use StatementId::*;
        match self {
            DatabaseInfo => "AssetDb::GetDatabaseInfo",
            ScanFolders => "AssetDb::QueryScanFoldersTable",
            ScanFolderById => "AssetDb::QueryScanFolderByScanFolderID",
            ScanFolderByDisplayName => "AssetDb::QueryScanFolderByDisplayName",
            ScanFolderByPortableKey => "AssetDb::QueryScanFolderByPortableKey",
            Sources => "AssetDb::QuerySourcesTable",
            SourceById => "AssetDb::QuerySourceBySourceID",
            SourcesByScanFolderId => "AssetDb::QuerySourceByScanFolderID",
            SourceByGuid => "AssetDb::QuerySourceBySourceGuid",
            SourcesBySourceName => "AssetDb::QuerySourceBySourceName",
            SourceBySourceNameScanFolderId => "AssetDb::QuerySourceBySourceNameScanFolderID",
            SourcesLikeSourceName => "AssetDb::QuerySourceLikeSourceName",
            Jobs => "AssetDb::QueryJobsTable",
            JobsPlatform => "AssetDb::QueryJobsTablePlatform",
            JobById => "AssetDb::QueryJobByJobID",
            JobsByJobKey => "AssetDb::QueryJobByJobKey",
            JobByJobRunKey => "AssetDb::QueryJobByJobRunKey",
            JobByProductId => "AssetDb::QueryJobByProductID",
            JobsBySourceId => "AssetDb::QueryJobBySourceID",
            JobsBySourceIdPlatform => "AssetDb::QueryJobBySourceIDPlatform",
            Products => "AssetDb::QueryProductsTable",
            ProductsPlatform => "AssetDb::QueryProductsTablePlatform",
            ProductById => "AssetDb::QueryProductByProductID",
            ProductsByJobId => "AssetDb::QueryProductByJobID",
            ProductsByJobIdPlatform => "AssetDb::QueryProductByJobIDPlatform",
            ProductsBySourceId => "AssetDb::QueryProductBySourceID",
            ProductsBySourceIdPlatform => "AssetDb::QueryProductBySourceIDPlatform",
            ProductsByProductName => "AssetDb::QueryProductByProductName",
            ProductsByProductNamePlatform => "AssetDb::QueryProductByProductNamePlatform",
            ProductsLikeProductName => "AssetDb::QueryProductLikeProductName",
            ProductsLikeProductNamePlatform => "AssetDb::QueryProductLikeProductNamePlatform",
            ProductsBySourceName => "AssetDb::QueryProductBySourceName",
            ProductsBySourceNamePlatform => "AssetDb::QueryProductBySourceNamePlatform",
            ProductsLikeSourceName => "AssetDb::QueryProductLikeSourceName",
            ProductsLikeSourceNamePlatform => "AssetDb::QueryProductLikeSourceNamePlatform",
            LegacySubIdsByProductId => "AssetDb::QueryLegacySubIdsByProductID",
            Combined => "AssetDb::QueryCombined",
            CombinedPlatform => "AssetDb::QueryCombinedPlatform",
            CombinedBySourceId => "AssetDb::QueryCombinedBySourceID",
            CombinedBySourceIdPlatform => "AssetDb::QueryCombinedBySourceIDPlatform",
            CombinedByJobId => "AssetDb::QueryCombinedByJobID",
            CombinedByJobIdPlatform => "AssetDb::QueryCombinedByJobIDPlatform",
            CombinedByProductId => "AssetDb::QueryCombinedByProductID",
            CombinedByProductIdPlatform => "AssetDb::QueryCombinedByProductIDPlatform",
            CombinedBySourceGuidProductSubId => "AssetDb::QueryCombinedBySourceGuidProductSubID",
            CombinedBySourceGuidProductSubIdPlatform => {
                "AssetDb::QueryCombinedBySourceGuidProductSubIDPlatform"
            }
            CombinedBySourceName => "AssetDb::QueryCombinedBySourceName",
            CombinedBySourceNamePlatform => "AssetDb::QueryCombinedBySourceNamePlatform",
            CombinedLikeSourceName => "AssetDb::QueryCombinedLikeSourceName",
            CombinedLikeSourceNamePlatform => "AssetDb::QueryCombinedLikeSourceNamePlatform",
            CombinedByProductName => "AssetDb::QueryCombinedByProductName",
            CombinedByProductNamePlatform => "AssetDb::QueryCombinedByProductNamePlatform",
            CombinedLikeProductName => "AssetDb::QueryCombinedLikeProductName",
            CombinedLikeProductNamePlatform => "AssetDb::QueryCombinedLikeProductNamePlatform",
            SourceDependencyById => "AssetDb::QuerySourceDependencyBySourceDependencyID",
            SourceDependencyByExact => "AssetDb::QuerySourceDependencyByExact",
            SourceDependenciesByDependsOnSource => "AssetDb::QuerySourceDependencyByDependsOnSource",
            SourceDependenciesBySource => "AssetDb::QueryDependsOnSourceBySourceDependency",
            SourceDependenciesByBuilderGuidSource => {
                "AssetDb::QuerySourceDependencyByBuilderGuidAndSource"
            }
            ProductDependencies => "AssetDb::QueryProductDependenciesTable",
            ProductDependencyById => "AssetDb::QueryProductDependencyByProductDependencyID",
            ProductDependenciesByProductId => "AssetDb::QueryProductDependencyByProductID",
            DirectProductDependencies => "AssetDb::QueryDirectProductDependencies",
            AllProductDependencies => "AssetDb::QueryAllProductDependencies",
        }
    }

    pub fn sql(self) -> &'static str {
        use StatementId::*;
        match self {
            DatabaseInfo => "SELECT * FROM dbinfo LIMIT 1",

            ScanFolders => "SELECT * FROM ScanFolders",
            ScanFolderById => "SELECT * FROM ScanFolders WHERE ScanFolderID = :scanfolderid",
            ScanFolderByDisplayName => "SELECT * FROM ScanFolders WHERE DisplayName = :displayname",
            ScanFolderByPortableKey => "SELECT * FROM ScanFolders WHERE PortableKey = :portablekey",

            Sources => "SELECT * FROM Sources",
            SourceById => "SELECT * FROM Sources WHERE SourceID = :sourceid",
            SourcesByScanFolderId => "SELECT * FROM Sources WHERE ScanFolderPK = :scanfolderid",
            SourceByGuid => "SELECT * FROM Sources WHERE SourceGuid = :sourceguid",
            SourcesBySourceName => "SELECT * FROM Sources WHERE SourceName = :sourcename",
            SourceBySourceNameScanFolderId => {
                "SELECT * FROM Sources WHERE SourceName = :sourcename AND ScanFolderPK = :scanfolderid"
            }
            SourcesLikeSourceName => {
                "SELECT * FROM Sources WHERE SourceName LIKE :sourcename ESCAPE '|'"
            }

            Jobs => "SELECT * FROM Jobs",
            JobsPlatform => "SELECT * FROM Jobs WHERE Platform = :platform",
            JobById => "SELECT * FROM Jobs WHERE JobID = :jobid",
            JobsByJobKey => "SELECT * FROM Jobs WHERE JobKey = :jobkey",
            JobByJobRunKey => "SELECT * FROM Jobs WHERE JobRunKey = :jobrunkey",
            JobByProductId => {
                "SELECT Jobs.* FROM Jobs INNER JOIN Products ON Products.JobPK = Jobs.JobID \
                 WHERE Products.ProductID = :productid"
            }
            JobsBySourceId => "SELECT * FROM Jobs WHERE SourcePK = :sourceid",
            JobsBySourceIdPlatform => {
                "SELECT * FROM Jobs WHERE SourcePK = :sourceid AND Platform = :platform"
            }

            Products => products_sql!(),
            ProductsPlatform => products_sql!(" WHERE Jobs.Platform = :platform"),
            ProductById => products_sql!(" WHERE Products.ProductID = :productid"),
            ProductsByJobId => products_sql!(" WHERE Products.JobPK = :jobid"),
            ProductsByJobIdPlatform => {
                products_sql!(" WHERE Products.JobPK = :jobid AND Jobs.Platform = :platform")
            }
            ProductsBySourceId => products_sql!(" WHERE Jobs.SourcePK = :sourceid"),
            ProductsBySourceIdPlatform => {
                products_sql!(" WHERE Jobs.SourcePK = :sourceid AND Jobs.Platform = :platform")
            }
            ProductsByProductName => products_sql!(" WHERE Products.ProductName = :productname"),
            ProductsByProductNamePlatform => products_sql!(
                " WHERE Products.ProductName = :productname AND Jobs.Platform = :platform"
            ),
            ProductsLikeProductName => {
                products_sql!(" WHERE Products.ProductName LIKE :productname ESCAPE '|'")
            }
            ProductsLikeProductNamePlatform => products_sql!(
                " WHERE Products.ProductName LIKE :productname ESCAPE '|' AND Jobs.Platform = :platform"
            ),
            ProductsBySourceName => products_by_source_sql!(" WHERE Sources.SourceName = :sourcename"),
            ProductsBySourceNamePlatform => products_by_source_sql!(
                " WHERE Sources.SourceName = :sourcename AND Jobs.Platform = :platform"
            ),
            ProductsLikeSourceName => {
                products_by_source_sql!(" WHERE Sources.SourceName LIKE :sourcename ESCAPE '|'")
            }
            ProductsLikeSourceNamePlatform => products_by_source_sql!(
                " WHERE Sources.SourceName LIKE :sourcename ESCAPE '|' AND Jobs.Platform = :platform"
            ),

            LegacySubIdsByProductId => "SELECT * FROM LegacySubIDs WHERE ProductPK = :productid",

            Combined => combined_sql!(),
            CombinedPlatform => combined_sql!(" WHERE Jobs.Platform = :platform"),
            CombinedBySourceId => combined_sql!(" WHERE Sources.SourceID = :sourceid"),
            CombinedBySourceIdPlatform => {
                combined_sql!(" WHERE Sources.SourceID = :sourceid AND Jobs.Platform = :platform")
            }
            CombinedByJobId => combined_sql!(" WHERE Jobs.JobID = :jobid"),
            CombinedByJobIdPlatform => {
                combined_sql!(" WHERE Jobs.JobID = :jobid AND Jobs.Platform = :platform")
            }
            CombinedByProductId => combined_sql!(" WHERE Products.ProductID = :productid"),
            CombinedByProductIdPlatform => combined_sql!(
                " WHERE Products.ProductID = :productid AND Jobs.Platform = :platform"
            ),
            CombinedBySourceGuidProductSubId => combined_sql!(
                " WHERE Products.SubID = :productsubid",
                " AND (Sources.SourceGuid = :sourceguid OR Products.LegacyGuid = :sourceguid)"
            ),
            CombinedBySourceGuidProductSubIdPlatform => combined_sql!(
                " WHERE Products.SubID = :productsubid",
                " AND (Sources.SourceGuid = :sourceguid OR Products.LegacyGuid = :sourceguid)",
                " AND Jobs.Platform = :platform"
            ),
            CombinedBySourceName => combined_sql!(" WHERE Sources.SourceName = :sourcename"),
            CombinedBySourceNamePlatform => combined_sql!(
                " WHERE Sources.SourceName = :sourcename AND Jobs.Platform = :platform"
            ),
            CombinedLikeSourceName => {
                combined_sql!(" WHERE Sources.SourceName LIKE :sourcename ESCAPE '|'")
            }
            CombinedLikeSourceNamePlatform => combined_sql!(
                " WHERE Sources.SourceName LIKE :sourcename ESCAPE '|' AND Jobs.Platform = :platform"
            ),
            CombinedByProductName => combined_sql!(" WHERE Products.ProductName = :productname"),
            CombinedByProductNamePlatform => combined_sql!(
                " WHERE Products.ProductName = :productname AND Jobs.Platform = :platform"
            ),
            CombinedLikeProductName => {
                combined_sql!(" WHERE Products.ProductName LIKE :productname ESCAPE '|'")
            }
            CombinedLikeProductNamePlatform => combined_sql!(
                " WHERE Products.ProductName LIKE :productname ESCAPE '|' AND Jobs.Platform = :platform"
            ),

            SourceDependencyById => {
                "SELECT * FROM SourceDependency WHERE SourceDependencyID = :sourcedependencyid"
            }
            SourceDependencyByExact => {
                "SELECT * FROM SourceDependency WHERE BuilderGuid = :builderguid \
                 AND Source = :source AND DependsOnSource = :dependsonsource"
            }
            SourceDependenciesByDependsOnSource => {
                "SELECT * FROM SourceDependency WHERE DependsOnSource = :dependsonsource \
                 AND Source LIKE :dependentfilter ESCAPE '|'"
            }
            SourceDependenciesBySource => {
                "SELECT * FROM SourceDependency WHERE Source = :source \
                 AND DependsOnSource LIKE :dependencyfilter ESCAPE '|'"
            }
            SourceDependenciesByBuilderGuidSource => {
                "SELECT * FROM SourceDependency WHERE BuilderGuid = :builderguid AND Source = :source"
            }

            ProductDependencies => {
                "SELECT ProductDependencies.*, Sources.SourceGuid, Products.SubID \
                 FROM ProductDependencies \
                 INNER JOIN Products ON Products.ProductID = ProductDependencies.ProductPK \
                 INNER JOIN Jobs ON Jobs.JobID = Products.JobPK \
                 INNER JOIN Sources ON Sources.SourceID = Jobs.SourcePK"
            }
            ProductDependencyById => {
                "SELECT * FROM ProductDependencies WHERE ProductDependencyID = :productdependencyid"
            }
            ProductDependenciesByProductId => {
                "SELECT * FROM ProductDependencies WHERE ProductPK = :productid"
            }
            DirectProductDependencies => concat!(
                "SELECT DISTINCT Products.*, Jobs.* FROM ProductDependencies",
                dependency_target_join!(),
                " WHERE ProductDependencies.ProductPK = :productid"
            ),
            AllProductDependencies => ALL_PRODUCT_DEPENDENCIES_SQL,
        }
    }

    /// Tables checked before the statement is prepared.
    pub fn tables(self) -> &'static [&'static str] {
        use StatementId::*;
        match self {
            DatabaseInfo => &[DBINFO_TABLE],
            ScanFolders | ScanFolderById | ScanFolderByDisplayName | ScanFolderByPortableKey => {
                &[SCAN_FOLDERS_TABLE]
            }
            Sources
            | SourceById
            | SourcesByScanFolderId
            | SourceByGuid
            | SourcesBySourceName
            | SourceBySourceNameScanFolderId
            | SourcesLikeSourceName => &[SOURCES_TABLE],
            Jobs | JobsPlatform | JobById | JobsByJobKey | JobByJobRunKey | JobsBySourceId
            | JobsBySourceIdPlatform => &[JOBS_TABLE],
            JobByProductId
            | Products
            | ProductsPlatform
            | ProductById
            | ProductsByJobId
            | ProductsByJobIdPlatform
            | ProductsBySourceId
            | ProductsBySourceIdPlatform
            | ProductsByProductName
            | ProductsByProductNamePlatform
            | ProductsLikeProductName
            | ProductsLikeProductNamePlatform => JOB_PRODUCT_TABLES,
            ProductsBySourceName
            | ProductsBySourceNamePlatform
            | ProductsLikeSourceName
            | ProductsLikeSourceNamePlatform => SOURCE_JOB_PRODUCT_TABLES,
            LegacySubIdsByProductId => &[LEGACY_SUB_IDS_TABLE],
            Combined
            | CombinedPlatform
            | CombinedBySourceId
            | CombinedBySourceIdPlatform
            | CombinedByJobId
            | CombinedByJobIdPlatform
            | CombinedByProductId
            | CombinedByProductIdPlatform
            | CombinedBySourceGuidProductSubId
            | CombinedBySourceGuidProductSubIdPlatform
            | CombinedBySourceName
            | CombinedBySourceNamePlatform
            | CombinedLikeSourceName
            | CombinedLikeSourceNamePlatform
            | CombinedByProductName
            | CombinedByProductNamePlatform
            | CombinedLikeProductName
            | CombinedLikeProductNamePlatform => COMBINED_TABLES,
            SourceDependencyById
            | SourceDependencyByExact
            | SourceDependenciesByDependsOnSource
            | SourceDependenciesBySource
            | SourceDependenciesByBuilderGuidSource => &[SOURCE_DEPENDENCY_TABLE],
            ProductDependencyById | ProductDependenciesByProductId => &[PRODUCT_DEPENDENCIES_TABLE],
            ProductDependencies | DirectProductDependencies | AllProductDependencies => {
                DEPENDENCY_JOIN_TABLES
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_statement_names_are_unique() {
        let names: HashSet<_> = StatementId::ALL.iter().map(|id| id.name()).collect();
        assert_eq!(names.len(), StatementId::ALL.len());
    }

    #[test]
    fn test_platform_twins_filter_on_platform() {
        for id in StatementId::ALL {
            let twin = id.with_platform();
            if twin == id {
                continue;
            }
            assert!(!id.sql().contains(":platform"), "{} filters on platform", id.name());
            assert!(twin.sql().contains("Platform = :platform"), "{} ignores platform", twin.name());
            assert_eq!(twin.with_platform(), twin);
            assert_eq!(twin.tables(), id.tables());
        }
    }

    #[test]
    fn test_unfiltered_combined_has_no_platform_clause() {
        assert!(!StatementId::Combined.sql().contains("WHERE"));
        assert_eq!(StatementId::Combined.for_platform(None), StatementId::Combined);
        assert_eq!(
            StatementId::Combined.for_platform(Some("pc")),
            StatementId::CombinedPlatform
        );
    }

    #[test]
    fn test_like_statements_declare_escape_character() {
        for id in StatementId::ALL {
            if id.sql().contains(" LIKE ") {
                assert!(id.sql().contains("ESCAPE '|'"), "{} lacks ESCAPE", id.name());
            }
        }
    }

    #[test]
    fn test_combined_joins_sources_by_scan_folder_key() {
        assert!(StatementId::CombinedByProductName
            .sql()
            .contains("Sources.ScanFolderPK = ScanFolders.ScanFolderID"));
    }
}
