//! Collaborators that decide where the store lives and how it is opened.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// File name used when no location is configured.
pub const DEFAULT_DATABASE_FILE: &str = "assetdb.sqlite";

/// Supplies the path of the store file.
///
/// `None` means no path is configured; the connection then uses
/// [`DEFAULT_DATABASE_FILE`] relative to the working directory.
pub trait DatabaseLocation: fmt::Debug {
    fn database_path(&self) -> Option<PathBuf>;
}

/// A location fixed at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocation(pub PathBuf);

impl FixedLocation {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self(path.as_ref().to_path_buf())
    }
}

impl DatabaseLocation for FixedLocation {
    fn database_path(&self) -> Option<PathBuf> {
        Some(self.0.clone())
    }
}

/// `$XDG_CACHE_HOME/assetdb/assetdb.sqlite`, or `~/.cache/assetdb/...`.
///
/// The asset database is a rebuildable cache, so it lives under the cache
/// directory rather than the data directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct XdgCacheLocation;

impl XdgCacheLocation {
    /// Resolves the path without touching the filesystem; the parent
    /// directory is created when the store is opened.
    pub fn resolve() -> crate::Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("assetdb")
            .get_cache_file(DEFAULT_DATABASE_FILE)
            .ok_or_else(|| crate::AssetDbError::XdgDirectory("no cache home directory".to_string()))
    }
}

impl DatabaseLocation for XdgCacheLocation {
    fn database_path(&self) -> Option<PathBuf> {
        match Self::resolve() {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("Could not resolve the XDG cache location: {e}");
                None
            }
        }
    }
}

/// The path `location` points at, or [`DEFAULT_DATABASE_FILE`] when it is
/// unset or empty.
pub(crate) fn resolve_database_path(location: &dyn DatabaseLocation) -> PathBuf {
    location
        .database_path()
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
}

/// The filesystem operations performed before the store is opened.
pub trait Filesystem: fmt::Debug {
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_writable(&self, path: &Path) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_writable(&self, path: &Path) -> bool {
        fs::metadata(path)
            .map(|metadata| !metadata.permissions().readonly())
            .unwrap_or(false)
    }
}

/// How the store file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Open an existing store for queries only; never creates the file.
    #[default]
    ReadOnly,
    /// Create the store and its schema if needed, and allow writes.
    ReadWrite,
}

impl OpenMode {
    pub fn is_writable(self) -> bool {
        self == OpenMode::ReadWrite
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_location_returns_its_path() {
        let location = FixedLocation::new("/tmp/cache/assetdb.sqlite");
        assert_eq!(
            location.database_path(),
            Some(PathBuf::from("/tmp/cache/assetdb.sqlite"))
        );
    }

    #[test]
    fn test_empty_location_uses_default_file() {
        assert_eq!(
            resolve_database_path(&FixedLocation::new("")),
            PathBuf::from(DEFAULT_DATABASE_FILE)
        );
        assert_eq!(
            resolve_database_path(&FixedLocation::new("cache/store.sqlite")),
            PathBuf::from("cache/store.sqlite")
        );
    }

    #[test]
    fn test_xdg_location_does_not_create_directories() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::env::set_var("XDG_CACHE_HOME", dir.path());

        let path = XdgCacheLocation.database_path();
        assert_eq!(
            path,
            Some(dir.path().join("assetdb").join(DEFAULT_DATABASE_FILE))
        );
        assert!(!dir.path().join("assetdb").exists());
    }

    #[test]
    fn test_std_filesystem_reports_missing_files() {
        let fs = StdFilesystem;
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let missing = dir.path().join("missing.sqlite");
        assert!(!fs.exists(&missing));
        assert!(!fs.is_writable(&missing));

        let present = dir.path().join("present.sqlite");
        std::fs::write(&present, b"").expect("Failed to create file");
        assert!(fs.exists(&present));
        assert!(fs.is_writable(&present));
    }

    #[test]
    fn test_default_mode_is_read_only() {
        assert_eq!(OpenMode::default(), OpenMode::ReadOnly);
        assert!(OpenMode::ReadWrite.is_writable());
    }
}
