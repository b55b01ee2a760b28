//! Row readers.
//!
//! Each reader resolves the column indices it needs once per statement,
//! before the first row is stepped, and then decodes rows by index. A column
//! the result set does not have is reported as [`AssetDbError::MissingColumn`]
//! without touching any row.

use log::error;
use rusqlite::{types::Type, Row, Statement};
use uuid::Uuid;

use crate::{
    error::{AssetDbError, Result},
    models::{
        AssetId, CombinedEntry, DatabaseInfoEntry, DatabaseVersion, JobEntry, JobFilter, JobStatus,
        LegacySubIdEntry, ProductDependencyEntry, ProductEntry, ScanFolderEntry, SourceEntry,
        SourceFileDependencyEntry,
    },
};

/// Column indices for one entry type, resolved against a prepared statement.
pub(crate) trait RowSchema: Sized {
    type Entry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self>;

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<Self::Entry>;
}

pub(crate) fn column(stmt: &Statement<'_>, call: &'static str, name: &'static str) -> Result<usize> {
    stmt.column_index(name).map_err(|_| {
        error!("Results from {call} failed to have a {name} column");
        AssetDbError::MissingColumn { call, column: name }
    })
}

fn read_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

fn read_status(row: &Row<'_>, idx: usize) -> rusqlite::Result<JobStatus> {
    let value: i64 = row.get(idx)?;
    JobStatus::try_from(value)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, e.into()))
}

/// The job columns a [`JobFilter`] inspects.
pub(crate) struct FilterColumns {
    builder_guid: usize,
    job_key: usize,
    status: usize,
}

impl FilterColumns {
    /// Resolves the filter columns only when the filter checks rows.
    pub(crate) fn resolve(
        stmt: &Statement<'_>,
        call: &'static str,
        filter: &JobFilter,
    ) -> Result<Option<Self>> {
        if !filter.filters_rows() {
            return Ok(None);
        }
        Ok(Some(Self {
            builder_guid: column(stmt, call, "BuilderGuid")?,
            job_key: column(stmt, call, "JobKey")?,
            status: column(stmt, call, "Status")?,
        }))
    }

    pub(crate) fn accepts(&self, row: &Row<'_>, filter: &JobFilter) -> rusqlite::Result<bool> {
        let builder_guid: Uuid = row.get(self.builder_guid)?;
        let job_key = read_text(row, self.job_key)?;
        let status = read_status(row, self.status)?;
        Ok(filter.accepts(&builder_guid, &job_key, status))
    }
}

pub(crate) struct DatabaseInfoColumns {
    row_id: usize,
    version: usize,
}

impl RowSchema for DatabaseInfoColumns {
    type Entry = DatabaseInfoEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            row_id: column(stmt, call, "rowID")?,
            version: column(stmt, call, "version")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<DatabaseInfoEntry> {
        Ok(DatabaseInfoEntry {
            row_id: row.get(self.row_id)?,
            version: DatabaseVersion(row.get(self.version)?),
        })
    }
}

pub(crate) struct ScanFolderColumns {
    id: usize,
    path: usize,
    display_name: usize,
    portable_key: usize,
    output_prefix: usize,
    is_root: usize,
}

impl RowSchema for ScanFolderColumns {
    type Entry = ScanFolderEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "ScanFolderID")?,
            path: column(stmt, call, "ScanFolder")?,
            display_name: column(stmt, call, "DisplayName")?,
            portable_key: column(stmt, call, "PortableKey")?,
            output_prefix: column(stmt, call, "OutputPrefix")?,
            is_root: column(stmt, call, "IsRoot")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<ScanFolderEntry> {
        Ok(ScanFolderEntry {
            id: row.get(self.id)?,
            path: read_text(row, self.path)?,
            display_name: read_text(row, self.display_name)?,
            portable_key: read_text(row, self.portable_key)?,
            output_prefix: read_text(row, self.output_prefix)?,
            is_root: row.get(self.is_root)?,
        })
    }
}

pub(crate) struct SourceColumns {
    id: usize,
    scan_folder_id: usize,
    name: usize,
    guid: usize,
}

impl RowSchema for SourceColumns {
    type Entry = SourceEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "SourceID")?,
            scan_folder_id: column(stmt, call, "ScanFolderPK")?,
            name: column(stmt, call, "SourceName")?,
            guid: column(stmt, call, "SourceGuid")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<SourceEntry> {
        Ok(SourceEntry {
            id: row.get(self.id)?,
            scan_folder_id: row.get(self.scan_folder_id)?,
            name: read_text(row, self.name)?,
            guid: row.get(self.guid)?,
        })
    }
}

pub(crate) struct JobColumns {
    id: usize,
    source_id: usize,
    job_key: usize,
    fingerprint: usize,
    platform: usize,
    builder_guid: usize,
    status: usize,
    job_run_key: usize,
    first_fail_log_time: usize,
    first_fail_log_file: usize,
    last_fail_log_time: usize,
    last_fail_log_file: usize,
    last_log_time: usize,
    last_log_file: usize,
}

impl RowSchema for JobColumns {
    type Entry = JobEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "JobID")?,
            source_id: column(stmt, call, "SourcePK")?,
            job_key: column(stmt, call, "JobKey")?,
            fingerprint: column(stmt, call, "Fingerprint")?,
            platform: column(stmt, call, "Platform")?,
            builder_guid: column(stmt, call, "BuilderGuid")?,
            status: column(stmt, call, "Status")?,
            job_run_key: column(stmt, call, "JobRunKey")?,
            first_fail_log_time: column(stmt, call, "FirstFailLogTime")?,
            first_fail_log_file: column(stmt, call, "FirstFailLogFile")?,
            last_fail_log_time: column(stmt, call, "LastFailLogTime")?,
            last_fail_log_file: column(stmt, call, "LastFailLogFile")?,
            last_log_time: column(stmt, call, "LastLogTime")?,
            last_log_file: column(stmt, call, "LastLogFile")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<JobEntry> {
        Ok(JobEntry {
            id: row.get(self.id)?,
            source_id: row.get(self.source_id)?,
            job_key: read_text(row, self.job_key)?,
            fingerprint: row.get::<_, i64>(self.fingerprint)? as u32,
            platform: read_text(row, self.platform)?,
            builder_guid: row.get(self.builder_guid)?,
            status: read_status(row, self.status)?,
            job_run_key: row.get::<_, i64>(self.job_run_key)? as u64,
            first_fail_log_time: row.get(self.first_fail_log_time)?,
            first_fail_log_file: read_text(row, self.first_fail_log_file)?,
            last_fail_log_time: row.get(self.last_fail_log_time)?,
            last_fail_log_file: read_text(row, self.last_fail_log_file)?,
            last_log_time: row.get(self.last_log_time)?,
            last_log_file: read_text(row, self.last_log_file)?,
        })
    }
}

pub(crate) struct ProductColumns {
    id: usize,
    job_id: usize,
    sub_id: usize,
    name: usize,
    asset_type: usize,
    legacy_guid: usize,
}

impl RowSchema for ProductColumns {
    type Entry = ProductEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "ProductID")?,
            job_id: column(stmt, call, "JobPK")?,
            sub_id: column(stmt, call, "SubID")?,
            name: column(stmt, call, "ProductName")?,
            asset_type: column(stmt, call, "AssetType")?,
            legacy_guid: column(stmt, call, "LegacyGuid")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<ProductEntry> {
        Ok(ProductEntry {
            id: row.get(self.id)?,
            job_id: row.get(self.job_id)?,
            sub_id: row.get::<_, i64>(self.sub_id)? as u32,
            name: read_text(row, self.name)?,
            asset_type: row.get(self.asset_type)?,
            legacy_guid: row.get(self.legacy_guid)?,
        })
    }
}

pub(crate) struct LegacySubIdColumns {
    id: usize,
    product_id: usize,
    sub_id: usize,
}

impl RowSchema for LegacySubIdColumns {
    type Entry = LegacySubIdEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "LegacySubID")?,
            product_id: column(stmt, call, "ProductPK")?,
            sub_id: column(stmt, call, "SubID")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<LegacySubIdEntry> {
        Ok(LegacySubIdEntry {
            id: row.get(self.id)?,
            product_id: row.get(self.product_id)?,
            sub_id: row.get::<_, i64>(self.sub_id)? as u32,
        })
    }
}

pub(crate) struct SourceDependencyColumns {
    id: usize,
    builder_guid: usize,
    source: usize,
    depends_on_source: usize,
}

impl RowSchema for SourceDependencyColumns {
    type Entry = SourceFileDependencyEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "SourceDependencyID")?,
            builder_guid: column(stmt, call, "BuilderGuid")?,
            source: column(stmt, call, "Source")?,
            depends_on_source: column(stmt, call, "DependsOnSource")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<SourceFileDependencyEntry> {
        Ok(SourceFileDependencyEntry {
            id: row.get(self.id)?,
            builder_guid: row.get(self.builder_guid)?,
            source: read_text(row, self.source)?,
            depends_on_source: read_text(row, self.depends_on_source)?,
        })
    }
}

pub(crate) struct ProductDependencyColumns {
    id: usize,
    product_id: usize,
    dependency_source_guid: usize,
    dependency_sub_id: usize,
    dependency_flags: usize,
}

impl RowSchema for ProductDependencyColumns {
    type Entry = ProductDependencyEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            id: column(stmt, call, "ProductDependencyID")?,
            product_id: column(stmt, call, "ProductPK")?,
            dependency_source_guid: column(stmt, call, "DependencySourceGuid")?,
            dependency_sub_id: column(stmt, call, "DependencySubID")?,
            dependency_flags: column(stmt, call, "DependencyFlags")?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<ProductDependencyEntry> {
        Ok(ProductDependencyEntry {
            id: row.get(self.id)?,
            product_id: row.get(self.product_id)?,
            dependency_source_guid: row.get(self.dependency_source_guid)?,
            dependency_sub_id: row.get::<_, i64>(self.dependency_sub_id)? as u32,
            dependency_flags: row.get::<_, i64>(self.dependency_flags)? as u64,
        })
    }
}

/// A product dependency paired with the identity of the product owning it.
pub(crate) struct OwnedProductDependencyColumns {
    owner_guid: usize,
    owner_sub_id: usize,
    dependency: ProductDependencyColumns,
}

impl RowSchema for OwnedProductDependencyColumns {
    type Entry = (AssetId, ProductDependencyEntry);

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            owner_guid: column(stmt, call, "SourceGuid")?,
            owner_sub_id: column(stmt, call, "SubID")?,
            dependency: ProductDependencyColumns::resolve(stmt, call)?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<Self::Entry> {
        let owner = AssetId::new(
            row.get(self.owner_guid)?,
            row.get::<_, i64>(self.owner_sub_id)? as u32,
        );
        Ok((owner, self.dependency.read(row)?))
    }
}

pub(crate) struct CombinedColumns {
    scan_folder: ScanFolderColumns,
    source: SourceColumns,
    job: JobColumns,
    product: ProductColumns,
}

impl RowSchema for CombinedColumns {
    type Entry = CombinedEntry;

    fn resolve(stmt: &Statement<'_>, call: &'static str) -> Result<Self> {
        Ok(Self {
            scan_folder: ScanFolderColumns::resolve(stmt, call)?,
            source: SourceColumns::resolve(stmt, call)?,
            job: JobColumns::resolve(stmt, call)?,
            product: ProductColumns::resolve(stmt, call)?,
        })
    }

    fn read(&self, row: &Row<'_>) -> rusqlite::Result<CombinedEntry> {
        Ok(CombinedEntry {
            scan_folder: self.scan_folder.read(row)?,
            source: self.source.read(row)?,
            job: self.job.read(row)?,
            product: self.product.read(row)?,
            legacy_sub_ids: Vec::new(),
        })
    }
}
