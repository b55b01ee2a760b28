//! Schema creation and the `dbinfo` version stamp.

use log::{debug, warn};
use rusqlite::named_params;

use super::{columns::DatabaseInfoColumns, statements::StatementId};
use crate::{
    error::{AssetDbError, DatabaseResultExt, Result},
    models::{DatabaseInfoEntry, DatabaseVersion},
};

const SCHEMA_SQL: &str = include_str!("../../assets/schema.sql");
const SET_DATABASE_VERSION_SQL: &str =
    "INSERT OR REPLACE INTO dbinfo (rowID, version) VALUES (1, :version)";

impl super::AssetDatabaseConnection {
    /// Creates every table and index that does not exist yet.
    pub fn create_schema(&self) -> Result<()> {
        self.ensure_writable("AssetDb::CreateSchema")?;
        self.connection_for("AssetDb::CreateSchema")?
            .execute_batch(SCHEMA_SQL)
            .db_context("Failed to initialize database schema")?;
        debug!("Created asset database schema");
        Ok(())
    }

    /// Stamps `version` into the `dbinfo` singleton.
    pub fn set_database_version(&self, version: DatabaseVersion) -> Result<()> {
        self.ensure_writable("AssetDb::SetDatabaseVersion")?;
        self.connection_for("AssetDb::SetDatabaseVersion")?
            .prepare_cached(SET_DATABASE_VERSION_SQL)
            .and_then(|mut stmt| stmt.execute(named_params! { ":version": version.0 }))
            .db_context("Failed to set database version")?;
        Ok(())
    }

    /// Streams the `dbinfo` table.
    pub fn query_database_info<F>(&self, handler: F) -> Result<()>
    where
        F: FnMut(&mut DatabaseInfoEntry) -> bool,
    {
        self.query(StatementId::DatabaseInfo)?
            .rows::<DatabaseInfoColumns, _>(None, handler)
    }

    /// The stored schema version, or `DATABASE_DOES_NOT_EXIST` when the
    /// store has no readable `dbinfo` row.
    pub fn query_database_version(&self) -> Result<DatabaseVersion> {
        if !self.table_exists("dbinfo")? {
            warn!("Asset database has no dbinfo table");
            return Ok(DatabaseVersion::DATABASE_DOES_NOT_EXIST);
        }
        let info = self
            .query(StatementId::DatabaseInfo)?
            .first::<DatabaseInfoColumns>(None)?;
        Ok(info.map_or(DatabaseVersion::DATABASE_DOES_NOT_EXIST, |info| info.version))
    }

    pub(crate) fn ensure_writable(&self, call: &'static str) -> Result<()> {
        if self.mode().is_writable() {
            Ok(())
        } else {
            log::error!("{call} requires a read-write connection");
            Err(AssetDbError::ReadOnlyConnection { call })
        }
    }
}
