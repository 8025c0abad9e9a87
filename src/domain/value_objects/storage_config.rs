//! Storage configuration
//!
//! Tells lock validation where the cookbooks a lock references live on disk:
//! cached cookbooks under the cookbook cache, local cookbooks relative to the
//! directory holding the lockfile.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    relative_paths_root: PathBuf,
    cache_path: PathBuf,
}

impl StorageConfig {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_paths_root: PathBuf::from("."),
            cache_path: cache_path.into(),
        }
    }

    /// Resolve local cookbook sources relative to the lockfile's directory.
    pub fn use_policyfile_lock(mut self, lockfile_path: &Path) -> Self {
        self.relative_paths_root = lockfile_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        self
    }

    pub fn relative_paths_root(&self) -> &Path {
        &self.relative_paths_root
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Directory of a cached cookbook (`<cache_path>/<cache_key>`)
    pub fn cached_cookbook_dir(&self, cache_key: &str) -> PathBuf {
        self.cache_path.join(cache_key)
    }

    /// Directory of a local cookbook source
    pub fn local_cookbook_dir(&self, source: &str) -> PathBuf {
        self.relative_paths_root.join(source)
    }
}
