//! Error types for policy-push
//!
//! Library errors use `thiserror`; the binary reports them through `anyhow`.

use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::LockfileError;

/// Boxed error used as the chained cause of a [`PushError::PolicyfilePush`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result type alias for push operations
pub type PushResult<T> = Result<T, PushError>;

/// Terminal failures of a push.
#[derive(Error, Debug)]
pub enum PushError {
    /// The lockfile next to the policy file does not exist
    #[error("No lockfile at {} - you need to run `install` before `push`", path.display())]
    LockfileNotFound { path: PathBuf },

    /// Reading, validating, or uploading the lock failed
    #[error("{message}")]
    PolicyfilePush {
        message: String,
        #[source]
        cause: BoxError,
    },

    /// Rewriting the validated lock to disk failed.
    ///
    /// Kept apart from `PolicyfilePush`: a failed rewrite is not reported as a
    /// push failure of the lock data itself.
    #[error("failed to write lockfile {}", path.display())]
    LockfileWrite {
        path: PathBuf,
        #[source]
        source: LockfileError,
    },
}

impl PushError {
    /// Wrap `cause` with a human-readable message.
    pub fn policyfile_push(message: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        PushError::PolicyfilePush {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// The original error this one wraps, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            PushError::LockfileNotFound { .. } => None,
            PushError::PolicyfilePush { cause, .. } => Some(cause.as_ref()),
            PushError::LockfileWrite { source, .. } => Some(source),
        }
    }

    /// Remediation hint shown to users alongside the error.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PushError::LockfileNotFound { .. } => {
                Some("Resolve the policy with `chef install` to create the lockfile, then push again.")
            }
            PushError::PolicyfilePush { message, .. } if message.starts_with("Failed to upload") => {
                Some("Check the server URL, client name, and signing key in your configuration.")
            }
            PushError::PolicyfilePush { .. } => {
                Some("The lockfile or a locked cookbook changed since install; re-run `chef install`.")
            }
            PushError::LockfileWrite { .. } => None,
        }
    }
}
