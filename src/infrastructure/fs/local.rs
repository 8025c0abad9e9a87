//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::path::Path;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Local file system implementation
///
/// Writes replace the target in one step: content goes to a temporary file
/// in the same directory, which is then renamed over the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    /// Create a new LocalFs instance
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // Same directory as the target so the rename stays on one file system
        let mut temp_file =
            tempfile::NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| FsError::from_io(path, e))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| FsError::from_io(path, e))?;
        temp_file
            .persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
