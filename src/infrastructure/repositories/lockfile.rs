//! JSON Lockfile Repository
//!
//! Implements the LockfileRepository port for `Policyfile.lock.json` files.

use std::path::Path;

use crate::domain::entities::{LockDocument, PolicyLock};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::lockfile_repository::{
    LockfileError, LockfileRepository, LockfileResult,
};
use crate::infrastructure::fs::LocalFs;

/// JSON lockfile repository
///
/// Writes the canonical lock as pretty-printed JSON with a trailing newline.
pub struct JsonLockfileRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl JsonLockfileRepository<LocalFs> {
    /// Create a new repository with the default file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl<F: FileSystem> JsonLockfileRepository<F> {
    /// Create with a custom file system
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

impl Default for JsonLockfileRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a lock the way it is stored on disk
pub fn render_lock(lock: &PolicyLock) -> Result<String, serde_json::Error> {
    let mut content = serde_json::to_string_pretty(&lock.to_lock())?;
    content.push('\n');
    Ok(content)
}

impl<F: FileSystem> LockfileRepository for JsonLockfileRepository<F> {
    fn exists(&self, path: &Path) -> bool {
        self.fs.exists(path)
    }

    fn load(&self, path: &Path) -> LockfileResult<LockDocument> {
        let content = self.fs.read(path).map_err(|source| LockfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| LockfileError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        LockDocument::from_value(value).map_err(|found| LockfileError::NotAnObject {
            path: path.to_path_buf(),
            found,
        })
    }

    fn save(&self, lock: &PolicyLock, path: &Path) -> LockfileResult<()> {
        let content = render_lock(lock).map_err(LockfileError::Encode)?;
        self.fs
            .write(path, &content)
            .map_err(|source| LockfileError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
