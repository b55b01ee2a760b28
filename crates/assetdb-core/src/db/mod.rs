//! SQLite access for the asset dependency database.
//!
//! [`AssetDatabaseConnection`] owns at most one SQLite connection. Queries
//! borrow the connection immutably and stream rows into a caller handler;
//! opening, closing and schema creation need exclusive access. The
//! connection is meant to be used from one thread at a time.

use std::{
    cell::RefCell,
    collections::HashSet,
    path::{Path, PathBuf},
};

use log::{debug, error, warn};
use rusqlite::{Connection, OpenFlags};

use crate::{
    config::{resolve_database_path, DatabaseLocation, Filesystem, OpenMode, StdFilesystem},
    error::{AssetDbError, DatabaseResultExt, Result},
    models::DatabaseVersion,
};

pub(crate) mod columns;
pub(crate) mod executor;
pub mod schema;
pub mod statements;
pub mod utils;

mod combined_queries;
mod dependency_queries;
mod job_info_queries;
mod job_queries;
mod product_queries;
mod scan_folder_queries;
mod source_queries;
mod writes;

pub use statements::{StatementId, MAX_DEPENDENCY_ROWS};
pub use utils::like_search_term;

const TABLE_EXISTS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)";

/// A connection to one asset database file.
///
/// Starts closed; [`open`](Self::open) connects and checks the schema
/// version. Every query on a closed connection fails with
/// [`AssetDbError::NotOpen`].
#[derive(Debug)]
pub struct AssetDatabaseConnection {
    connection: Option<Connection>,
    opened_path: Option<PathBuf>,
    validated_tables: RefCell<HashSet<&'static str>>,
    location: Box<dyn DatabaseLocation>,
    filesystem: Box<dyn Filesystem>,
    mode: OpenMode,
}

impl AssetDatabaseConnection {
    /// Creates a closed connection using the standard filesystem.
    pub fn new(location: Box<dyn DatabaseLocation>, mode: OpenMode) -> Self {
        Self::with_filesystem(location, Box::new(StdFilesystem), mode)
    }

    pub fn with_filesystem(
        location: Box<dyn DatabaseLocation>,
        filesystem: Box<dyn Filesystem>,
        mode: OpenMode,
    ) -> Self {
        Self {
            connection: None,
            opened_path: None,
            validated_tables: RefCell::new(HashSet::new()),
            location,
            filesystem,
            mode,
        }
    }

    /// The path of the open store, or the path `open` would use.
    pub fn database_path(&self) -> PathBuf {
        match &self.opened_path {
            Some(path) => path.clone(),
            None => resolve_database_path(self.location.as_ref()),
        }
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.connection.is_some()
    }

    /// Opens the store and checks its schema version.
    ///
    /// In read-write mode a store without a `dbinfo` table gets the full
    /// schema and the current version. On any failure the connection is left
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns `AssetDbError::AlreadyOpen` if the connection is open,
    /// `AssetDbError::ReadOnlyFile` if a read-write open targets a file that
    /// cannot be written, `AssetDbError::Database` if SQLite refuses the file
    /// and `AssetDbError::VersionMismatch` for any other schema version.
    pub fn open(&mut self) -> Result<()> {
        if self.connection.is_some() {
            error!("Attempt to open an asset database connection that is already open");
            return Err(AssetDbError::AlreadyOpen);
        }

        let path = self.database_path();
        self.prepare_location(&path)?;

        let flags = match self.mode {
            OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            OpenMode::ReadWrite => {
                OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX
            }
        };
        let connection = Connection::open_with_flags(&path, flags).map_err(|e| {
            warn!("Unable to open asset database at {}: {e}", path.display());
            AssetDbError::database(format!("Failed to open {}", path.display())).with_source(e)
        })?;
        connection.set_prepared_statement_cache_capacity(StatementId::ALL.len());
        connection
            .execute_batch("PRAGMA foreign_keys = ON")
            .db_context("Failed to enable foreign keys")?;

        self.validated_tables.borrow_mut().clear();
        self.connection = Some(connection);
        self.opened_path = Some(path.clone());
        debug!("Opened asset database {} ({:?})", path.display(), self.mode);

        if let Err(e) = self.post_open() {
            self.close();
            return Err(e);
        }
        Ok(())
    }

    /// Closes the connection; a no-op when already closed.
    pub fn close(&mut self) {
        self.validated_tables.borrow_mut().clear();
        if let Some(connection) = self.connection.take() {
            if let Err((_, e)) = connection.close() {
                warn!("Error while closing the asset database: {e}");
            }
            if let Some(path) = self.opened_path.take() {
                debug!("Closed asset database {}", path.display());
            }
        }
    }

    /// Checks that `table` exists, remembering the answer until the
    /// connection closes.
    ///
    /// # Errors
    ///
    /// `AssetDbError::NotOpen` when closed and `AssetDbError::MissingTable`
    /// when the table is absent.
    pub fn validate_table(&self, call: &'static str, table: &'static str) -> Result<()> {
        if self.validated_tables.borrow().contains(table) {
            return Ok(());
        }
        let connection = self.connection_for(call)?;
        let exists: bool = connection
            .query_row(TABLE_EXISTS_SQL, [table], |row| row.get(0))
            .db_context(&format!("Failed to look up table {table}"))?;
        if !exists {
            error!("Statement {call} requires table {table}, which does not exist");
            return Err(AssetDbError::MissingTable { call, table });
        }
        debug!("Validated table {table} for {call}");
        self.validated_tables.borrow_mut().insert(table);
        Ok(())
    }

    /// Whether `table` exists, without reporting its absence as an error.
    pub fn table_exists(&self, table: &str) -> Result<bool> {
        let connection = self.connection_for("AssetDb::TableExists")?;
        connection
            .query_row(TABLE_EXISTS_SQL, [table], |row| row.get(0))
            .db_context(&format!("Failed to look up table {table}"))
    }

    pub(crate) fn connection_for(&self, call: &'static str) -> Result<&Connection> {
        self.connection.as_ref().ok_or_else(|| {
            error!("Fatal: attempt to work on a database connection that doesn't exist: {call}");
            AssetDbError::NotOpen { call }
        })
    }

    fn prepare_location(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            // A failure here surfaces as a failed open below.
            if let Err(e) = self.filesystem.create_dir_all(parent) {
                warn!("Unable to create directory {}: {e}", parent.display());
            }
        }

        if self.mode.is_writable()
            && self.filesystem.exists(path)
            && !self.filesystem.is_writable(path)
        {
            error!(
                "Asset database file {} is marked read-only. The cache should not be checked into source control.",
                path.display()
            );
            return Err(AssetDbError::ReadOnlyFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn post_open(&self) -> Result<()> {
        if self.mode.is_writable() && !self.table_exists("dbinfo")? {
            self.create_schema()?;
            self.set_database_version(DatabaseVersion::CURRENT)?;
        }

        let found = self.query_database_version()?;
        if found != DatabaseVersion::CURRENT {
            error!(
                "Asset database {} has version {found}, expected {}",
                self.database_path().display(),
                DatabaseVersion::CURRENT
            );
            return Err(AssetDbError::VersionMismatch {
                found,
                expected: DatabaseVersion::CURRENT,
            });
        }
        Ok(())
    }
}

impl Drop for AssetDatabaseConnection {
    fn drop(&mut self) {
        self.close();
    }
}
