//! LockfileRepository port - abstraction for lockfile persistence
//!
//! Loads the raw lock document and writes a validated policy lock back,
//! without the domain knowing about JSON encoding details.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{LockDocument, PolicyLock};
use crate::domain::ports::file_system::FsError;

/// Result type for lockfile operations
pub type LockfileResult<T> = Result<T, LockfileError>;

/// Lockfile operation errors
#[derive(Debug, Error)]
pub enum LockfileError {
    #[error("could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    #[error("{} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON object, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    #[error("could not encode policy lock as JSON")]
    Encode(#[source] serde_json::Error),

    #[error("could not write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: FsError,
    },
}

/// Abstract repository for lockfile persistence
pub trait LockfileRepository {
    /// Check whether a lockfile exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Read and parse the lock document at `path`
    fn load(&self, path: &Path) -> LockfileResult<LockDocument>;

    /// Replace the lockfile at `path` with the canonical form of `lock`
    fn save(&self, lock: &PolicyLock, path: &Path) -> LockfileResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockfile_error_display() {
        let err = LockfileError::NotAnObject {
            path: PathBuf::from("Policyfile.lock.json"),
            found: "array",
        };
        assert_eq!(
            err.to_string(),
            "Policyfile.lock.json must contain a JSON object, found array"
        );
    }
}
