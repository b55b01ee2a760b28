//! Builder for creating and configuring asset database connections.

use std::path::{Path, PathBuf};

use crate::{
    config::{
        resolve_database_path, DatabaseLocation, Filesystem, FixedLocation, OpenMode,
        StdFilesystem, XdgCacheLocation,
    },
    db::AssetDatabaseConnection,
    error::Result,
};

/// Builder for [`AssetDatabaseConnection`].
#[derive(Debug)]
pub struct ConnectionBuilder {
    location: Option<Box<dyn DatabaseLocation>>,
    filesystem: Option<Box<dyn Filesystem>>,
    mode: OpenMode,
}

impl ConnectionBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            location: None,
            filesystem: None,
            mode: OpenMode::ReadOnly,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_CACHE_HOME/assetdb/assetdb.sqlite` or
    /// `~/.cache/assetdb/assetdb.sqlite`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.location = Some(Box::new(FixedLocation::new(path)));
        }
        self
    }

    pub fn with_location(mut self, location: Box<dyn DatabaseLocation>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_filesystem(mut self, filesystem: Box<dyn Filesystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    /// The path the built connection will open.
    pub fn database_path(&self) -> PathBuf {
        match &self.location {
            Some(location) => resolve_database_path(location.as_ref()),
            None => resolve_database_path(&XdgCacheLocation),
        }
    }

    /// Builds a closed connection.
    pub fn build(self) -> AssetDatabaseConnection {
        let location = self.location.unwrap_or_else(|| Box::new(XdgCacheLocation));
        let filesystem = self.filesystem.unwrap_or_else(|| Box::new(StdFilesystem));
        AssetDatabaseConnection::with_filesystem(location, filesystem, self.mode)
    }

    /// Builds the connection and opens it.
    ///
    /// # Errors
    ///
    /// Any error [`AssetDatabaseConnection::open`] reports.
    pub fn open(self) -> Result<AssetDatabaseConnection> {
        let mut connection = self.build();
        connection.open()?;
        Ok(connection)
    }
}

impl Default for ConnectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
