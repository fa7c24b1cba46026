//! FileSystem port - abstraction over file I/O operations
//!
//! Removal operations are idempotent: a target that is already gone is
//! success, never an error.

use std::path::{Path, PathBuf};

use crate::domain::entities::EntryKind;
use crate::domain::value_objects::ContentHash;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

#[derive(Debug, thiserror::Error)]
pub enum FsError {
    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Attach the path an `std::io::Error` occurred at.
    pub fn at(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// One entry found while walking a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walked root, `/`-separated.
    pub path: String,
    pub kind: EntryKind,
}

/// Abstract file system interface
pub trait FileSystem {
    /// True if anything (including a dangling symlink) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content atomically (temporary file then rename).
    fn write_atomic(&self, path: &Path, content: &str) -> FsResult<()>;

    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Remove a file or symlink.
    fn remove_file(&self, path: &Path) -> FsResult<()>;

    /// Remove a directory only if it is empty. Returns whether it was removed.
    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool>;

    /// Remove a directory tree.
    fn remove_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Every entry below `root`, parents before children. Empty if `root`
    /// does not exist.
    fn walk(&self, root: &Path) -> FsResult<Vec<WalkEntry>>;

    /// Copy one entry. Directories are created, not copied recursively;
    /// symlinks are recreated rather than followed.
    fn copy_entry(&self, from: &Path, to: &Path, kind: EntryKind) -> FsResult<()>;

    /// Hash of a file's content, or of a symlink's target.
    fn hash(&self, path: &Path, kind: EntryKind) -> FsResult<ContentHash>;
}
