//! policy-push - validate a locked Policyfile and push it to a policy group
//!
//! A push reads `Policyfile.lock.json`, re-checks every locked cookbook
//! against the local cache or source tree, writes the refreshed lock back,
//! and uploads it to a policy server under a policy group.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{PushOptions, PushUseCase};
pub use config::{Config, ServerConfig};
pub use domain::entities::{PolicyLock, RunListItem};
pub use domain::value_objects::{PolicyGroup, PolicyPaths, StorageConfig};
pub use error::{PushError, PushResult};
