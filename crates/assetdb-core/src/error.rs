//! Error types for the asset database library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::DatabaseVersion;

/// Every way an asset database call can fail.
///
/// Data-level absence is never an error: a lookup that matches nothing
/// returns `Ok(())` without invoking its handler.
#[derive(Error, Debug)]
pub enum AssetDbError {
    /// Store errors that carry the underlying SQLite error
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A call was made on a connection that is not open
    #[error("Attempt to work on a database connection that doesn't exist: {call}")]
    NotOpen { call: &'static str },
    /// `open` on a connection that is already open
    #[error("Database connection is already open")]
    AlreadyOpen,
    /// The store file exists but cannot be written
    #[error("Asset database file '{path}' is marked read-only. The cache should not be checked into source control.")]
    ReadOnlyFile { path: PathBuf },
    /// A write was attempted on a connection opened read-only
    #[error("{call} requires a read-write connection")]
    ReadOnlyConnection { call: &'static str },
    /// A table a statement depends on is absent from the store
    #[error("Statement {call} requires table {table}, which does not exist")]
    MissingTable {
        call: &'static str,
        table: &'static str,
    },
    /// A statement template lacks a parameter the caller binds
    #[error("Could not find the replacement for {parameter} in the statement {call}")]
    MissingParameter {
        call: &'static str,
        parameter: &'static str,
    },
    /// A result set lacks a column the row reader needs
    #[error("Results from {call} failed to have a {column} column")]
    MissingColumn {
        call: &'static str,
        column: &'static str,
    },
    /// The store reported an error while stepping through rows
    #[error("Error while stepping through {call}: {source}")]
    Step {
        call: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    /// The on-disk schema version is not the supported one
    #[error("Database version mismatch: found {found}, expected {expected}")]
    VersionMismatch {
        found: DatabaseVersion,
        expected: DatabaseVersion,
    },
    /// An update targeted a row that does not exist
    #[error("{what} not found")]
    NotFound { what: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> AssetDbError {
        AssetDbError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn with_reason(self, reason: impl Into<String>) -> AssetDbError {
        AssetDbError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl AssetDbError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| AssetDbError::database(message).with_source(e))
    }
}

/// Result type alias for asset database operations
pub type Result<T> = std::result::Result<T, AssetDbError>;
