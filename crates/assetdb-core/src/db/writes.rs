//! Insert, update and delete operations.
//!
//! An entry whose id is `-1` is inserted and receives the new row id; any
//! other id updates that row. Every write needs a read-write connection.

use log::debug;
use rusqlite::{named_params, OptionalExtension, ToSql};

use super::{columns::ScanFolderColumns, statements::StatementId};
use crate::{
    error::{AssetDbError, DatabaseResultExt, Result},
    models::{
        JobEntry, JobStatus, LegacySubIdEntry, ProductDependencyEntry, ProductEntry,
        ScanFolderEntry, SourceEntry, SourceFileDependencyEntry,
    },
};

const INSERT_SCAN_FOLDER_SQL: &str = "INSERT INTO ScanFolders (ScanFolder, DisplayName, PortableKey, OutputPrefix, IsRoot) VALUES (:scanfolder, :displayname, :portablekey, :outputprefix, :isroot)";
const UPDATE_SCAN_FOLDER_SQL: &str = "UPDATE ScanFolders SET ScanFolder = :scanfolder, DisplayName = :displayname, PortableKey = :portablekey, OutputPrefix = :outputprefix, IsRoot = :isroot WHERE ScanFolderID = :id";
const DELETE_SCAN_FOLDER_SQL: &str = "DELETE FROM ScanFolders WHERE ScanFolderID = :id";

const INSERT_SOURCE_SQL: &str = "INSERT INTO Sources (ScanFolderPK, SourceName, SourceGuid) VALUES (:scanfolderid, :sourcename, :sourceguid)";
const UPDATE_SOURCE_SQL: &str = "UPDATE Sources SET ScanFolderPK = :scanfolderid, SourceName = :sourcename, SourceGuid = :sourceguid WHERE SourceID = :id";
const DELETE_SOURCE_SQL: &str = "DELETE FROM Sources WHERE SourceID = :id";

const INSERT_JOB_SQL: &str = "INSERT INTO Jobs (SourcePK, JobKey, Fingerprint, Platform, BuilderGuid, Status, JobRunKey, FirstFailLogTime, FirstFailLogFile, LastFailLogTime, LastFailLogFile, LastLogTime, LastLogFile) VALUES (:sourceid, :jobkey, :fingerprint, :platform, :builderguid, :status, :jobrunkey, :firstfaillogtime, :firstfaillogfile, :lastfaillogtime, :lastfaillogfile, :lastlogtime, :lastlogfile)";
const UPDATE_JOB_SQL: &str = "UPDATE Jobs SET SourcePK = :sourceid, JobKey = :jobkey, Fingerprint = :fingerprint, Platform = :platform, BuilderGuid = :builderguid, Status = :status, JobRunKey = :jobrunkey, FirstFailLogTime = :firstfaillogtime, FirstFailLogFile = :firstfaillogfile, LastFailLogTime = :lastfaillogtime, LastFailLogFile = :lastfaillogfile, LastLogTime = :lastlogtime, LastLogFile = :lastlogfile WHERE JobID = :id";
const DELETE_JOB_SQL: &str = "DELETE FROM Jobs WHERE JobID = :id";
const HIGHEST_JOB_RUN_KEY_SQL: &str = "SELECT MAX(JobRunKey) FROM Jobs";

const INSERT_PRODUCT_SQL: &str = "INSERT INTO Products (JobPK, ProductName, SubID, AssetType, LegacyGuid) VALUES (:jobid, :productname, :subid, :assettype, :legacyguid)";
const UPDATE_PRODUCT_SQL: &str = "UPDATE Products SET JobPK = :jobid, ProductName = :productname, SubID = :subid, AssetType = :assettype, LegacyGuid = :legacyguid WHERE ProductID = :id";
const DELETE_PRODUCT_SQL: &str = "DELETE FROM Products WHERE ProductID = :id";

const INSERT_LEGACY_SUB_ID_SQL: &str =
    "INSERT INTO LegacySubIDs (ProductPK, SubID) VALUES (:productid, :subid)";
const UPDATE_LEGACY_SUB_ID_SQL: &str =
    "UPDATE LegacySubIDs SET ProductPK = :productid, SubID = :subid WHERE LegacySubID = :id";
const DELETE_LEGACY_SUB_IDS_BY_PRODUCT_SQL: &str =
    "DELETE FROM LegacySubIDs WHERE ProductPK = :id";

const INSERT_SOURCE_DEPENDENCY_SQL: &str = "INSERT INTO SourceDependency (BuilderGuid, Source, DependsOnSource) VALUES (:builderguid, :source, :dependsonsource)";
const UPDATE_SOURCE_DEPENDENCY_SQL: &str = "UPDATE SourceDependency SET BuilderGuid = :builderguid, Source = :source, DependsOnSource = :dependsonsource WHERE SourceDependencyID = :id";
const DELETE_SOURCE_DEPENDENCY_SQL: &str =
    "DELETE FROM SourceDependency WHERE SourceDependencyID = :id";

const INSERT_PRODUCT_DEPENDENCY_SQL: &str = "INSERT INTO ProductDependencies (ProductPK, DependencySourceGuid, DependencySubID, DependencyFlags) VALUES (:productid, :dependencysourceguid, :dependencysubid, :dependencyflags)";
const UPDATE_PRODUCT_DEPENDENCY_SQL: &str = "UPDATE ProductDependencies SET ProductPK = :productid, DependencySourceGuid = :dependencysourceguid, DependencySubID = :dependencysubid, DependencyFlags = :dependencyflags WHERE ProductDependencyID = :id";
const DELETE_PRODUCT_DEPENDENCIES_BY_PRODUCT_SQL: &str =
    "DELETE FROM ProductDependencies WHERE ProductPK = :id";

/// The SQL and naming for one table's insert/update pair.
struct Upsert {
    call: &'static str,
    table: &'static str,
    insert_sql: &'static str,
    update_sql: &'static str,
}

impl super::AssetDatabaseConnection {
    /// Stores a scan folder. A new entry whose portable key is already stored
    /// updates that row instead of adding a second one.
    pub fn set_scan_folder(&self, entry: &mut ScanFolderEntry) -> Result<()> {
        if entry.id == -1 {
            let existing = self
                .query(StatementId::ScanFolderByPortableKey)?
                .bind(":portablekey", entry.portable_key.as_str())?
                .first::<ScanFolderColumns>(None)?;
            if let Some(existing) = existing {
                debug!("Reusing scan folder {} for key {}", existing.id, entry.portable_key);
                entry.id = existing.id;
            }
        }

        let upsert = Upsert {
            call: "AssetDb::SetScanFolder",
            table: "ScanFolders",
            insert_sql: INSERT_SCAN_FOLDER_SQL,
            update_sql: UPDATE_SCAN_FOLDER_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":scanfolder": entry.path,
                ":displayname": entry.display_name,
                ":portablekey": entry.portable_key,
                ":outputprefix": entry.output_prefix,
                ":isroot": entry.is_root,
            },
        )
    }

    pub fn set_source(&self, entry: &mut SourceEntry) -> Result<()> {
        let upsert = Upsert {
            call: "AssetDb::SetSource",
            table: "Sources",
            insert_sql: INSERT_SOURCE_SQL,
            update_sql: UPDATE_SOURCE_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":scanfolderid": entry.scan_folder_id,
                ":sourcename": entry.name,
                ":sourceguid": entry.guid,
            },
        )
    }

    /// Stores a job.
    ///
    /// # Errors
    ///
    /// `AssetDbError::InvalidInput` for the query-only `JobStatus::Any` or a
    /// nil builder guid.
    pub fn set_job(&self, entry: &mut JobEntry) -> Result<()> {
        if entry.status == JobStatus::Any {
            return Err(AssetDbError::invalid_input("status")
                .with_reason("JobStatus::Any is a query wildcard and cannot be stored"));
        }
        if entry.builder_guid.is_nil() {
            return Err(AssetDbError::invalid_input("builder_guid")
                .with_reason("a job needs a builder guid"));
        }

        let fingerprint = i64::from(entry.fingerprint);
        let status = entry.status.as_i64();
        let job_run_key = entry.job_run_key as i64;
        let upsert = Upsert {
            call: "AssetDb::SetJob",
            table: "Jobs",
            insert_sql: INSERT_JOB_SQL,
            update_sql: UPDATE_JOB_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":sourceid": entry.source_id,
                ":jobkey": entry.job_key,
                ":fingerprint": fingerprint,
                ":platform": entry.platform,
                ":builderguid": entry.builder_guid,
                ":status": status,
                ":jobrunkey": job_run_key,
                ":firstfaillogtime": entry.first_fail_log_time,
                ":firstfaillogfile": entry.first_fail_log_file,
                ":lastfaillogtime": entry.last_fail_log_time,
                ":lastfaillogfile": entry.last_fail_log_file,
                ":lastlogtime": entry.last_log_time,
                ":lastlogfile": entry.last_log_file,
            },
        )
    }

    pub fn set_product(&self, entry: &mut ProductEntry) -> Result<()> {
        let sub_id = i64::from(entry.sub_id);
        let upsert = Upsert {
            call: "AssetDb::SetProduct",
            table: "Products",
            insert_sql: INSERT_PRODUCT_SQL,
            update_sql: UPDATE_PRODUCT_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":jobid": entry.job_id,
                ":productname": entry.name,
                ":subid": sub_id,
                ":assettype": entry.asset_type,
                ":legacyguid": entry.legacy_guid,
            },
        )
    }

    pub fn set_legacy_sub_id(&self, entry: &mut LegacySubIdEntry) -> Result<()> {
        let sub_id = i64::from(entry.sub_id);
        let upsert = Upsert {
            call: "AssetDb::SetLegacySubID",
            table: "LegacySubIDs",
            insert_sql: INSERT_LEGACY_SUB_ID_SQL,
            update_sql: UPDATE_LEGACY_SUB_ID_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! { ":productid": entry.product_id, ":subid": sub_id },
        )
    }

    pub fn set_source_file_dependency(&self, entry: &mut SourceFileDependencyEntry) -> Result<()> {
        let upsert = Upsert {
            call: "AssetDb::SetSourceFileDependency",
            table: "SourceDependency",
            insert_sql: INSERT_SOURCE_DEPENDENCY_SQL,
            update_sql: UPDATE_SOURCE_DEPENDENCY_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":builderguid": entry.builder_guid,
                ":source": entry.source,
                ":dependsonsource": entry.depends_on_source,
            },
        )
    }

    pub fn set_product_dependency(&self, entry: &mut ProductDependencyEntry) -> Result<()> {
        let sub_id = i64::from(entry.dependency_sub_id);
        let flags = entry.dependency_flags as i64;
        let upsert = Upsert {
            call: "AssetDb::SetProductDependency",
            table: "ProductDependencies",
            insert_sql: INSERT_PRODUCT_DEPENDENCY_SQL,
            update_sql: UPDATE_PRODUCT_DEPENDENCY_SQL,
        };
        self.upsert(
            &upsert,
            &mut entry.id,
            named_params! {
                ":productid": entry.product_id,
                ":dependencysourceguid": entry.dependency_source_guid,
                ":dependencysubid": sub_id,
                ":dependencyflags": flags,
            },
        )
    }

    /// Deletes a scan folder and, through the foreign keys, everything
    /// under it. Returns whether a row was deleted.
    pub fn remove_scan_folder(&self, scan_folder_id: i64) -> Result<bool> {
        self.delete(
            "AssetDb::RemoveScanFolder",
            "ScanFolders",
            DELETE_SCAN_FOLDER_SQL,
            scan_folder_id,
        )
    }

    pub fn remove_source(&self, source_id: i64) -> Result<bool> {
        self.delete("AssetDb::RemoveSource", "Sources", DELETE_SOURCE_SQL, source_id)
    }

    pub fn remove_job(&self, job_id: i64) -> Result<bool> {
        self.delete("AssetDb::RemoveJob", "Jobs", DELETE_JOB_SQL, job_id)
    }

    pub fn remove_product(&self, product_id: i64) -> Result<bool> {
        self.delete("AssetDb::RemoveProduct", "Products", DELETE_PRODUCT_SQL, product_id)
    }

    pub fn remove_legacy_sub_ids_by_product_id(&self, product_id: i64) -> Result<bool> {
        self.delete(
            "AssetDb::RemoveLegacySubIDsByProductID",
            "LegacySubIDs",
            DELETE_LEGACY_SUB_IDS_BY_PRODUCT_SQL,
            product_id,
        )
    }

    pub fn remove_source_file_dependency(&self, source_dependency_id: i64) -> Result<bool> {
        self.delete(
            "AssetDb::RemoveSourceFileDependency",
            "SourceDependency",
            DELETE_SOURCE_DEPENDENCY_SQL,
            source_dependency_id,
        )
    }

    pub fn remove_product_dependencies_by_product_id(&self, product_id: i64) -> Result<bool> {
        self.delete(
            "AssetDb::RemoveProductDependenciesByProductID",
            "ProductDependencies",
            DELETE_PRODUCT_DEPENDENCIES_BY_PRODUCT_SQL,
            product_id,
        )
    }

    /// The largest stored job run key, or 0 when there are no jobs.
    pub fn highest_job_run_key(&self) -> Result<u64> {
        let call = "AssetDb::HighestJobRunKey";
        self.validate_table(call, "Jobs")?;
        let highest: Option<i64> = self
            .connection_for(call)?
            .query_row(HIGHEST_JOB_RUN_KEY_SQL, [], |row| row.get(0))
            .optional()
            .db_context("Failed to read the highest job run key")?
            .flatten();
        Ok(highest.map_or(0, |key| key as u64))
    }

    fn upsert(&self, upsert: &Upsert, id: &mut i64, fields: &[(&str, &dyn ToSql)]) -> Result<()> {
        let call = upsert.call;
        self.ensure_writable(call)?;
        self.validate_table(call, upsert.table)?;
        let connection = self.connection_for(call)?;

        if *id == -1 {
            connection
                .prepare_cached(upsert.insert_sql)
                .and_then(|mut stmt| stmt.execute(fields))
                .db_context(&format!("Failed to insert into {}", upsert.table))?;
            *id = connection.last_insert_rowid();
            debug!("{call} inserted row {id}");
            return Ok(());
        }

        let row_id = *id;
        let mut params: Vec<(&str, &dyn ToSql)> = fields.to_vec();
        params.push((":id", &row_id));
        let changed = connection
            .prepare_cached(upsert.update_sql)
            .and_then(|mut stmt| stmt.execute(params.as_slice()))
            .db_context(&format!("Failed to update {}", upsert.table))?;
        if changed == 0 {
            return Err(AssetDbError::not_found(format!("{} row {row_id}", upsert.table)));
        }
        Ok(())
    }

    fn delete(&self, call: &'static str, table: &'static str, sql: &str, id: i64) -> Result<bool> {
        self.ensure_writable(call)?;
        self.validate_table(call, table)?;
        let removed = self
            .connection_for(call)?
            .prepare_cached(sql)
            .and_then(|mut stmt| stmt.execute(named_params! { ":id": id }))
            .db_context(&format!("Failed to delete from {table}"))?;
        debug!("{call} removed {removed} row(s)");
        Ok(removed > 0)
    }
}
