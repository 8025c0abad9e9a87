//! FileSystem port - abstraction over file I/O operations
//!
//! Lets repositories read and replace files without depending on a concrete
//! implementation (local disk, in-memory mock).

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic replacement
/// - test doubles in the application tests
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Replace the file's content in full
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if anything exists at `path`, file or not
    fn exists(&self, path: &Path) -> bool;
}
