//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementation and home directory resolution
//! - `repositories/` - Lockfile and cookbook store implementations
//! - `http/` - Signed HTTP client and policy uploader
//! - `events/` - Event sink implementations (NDJSON)

pub mod events;
pub mod fs;
pub mod http;
pub mod repositories;

// Re-export for convenience
pub use events::JsonEventSink;
pub use fs::{policy_push_home_dir, LocalFs};
pub use http::{HttpPolicyUploader, HttpUploaderFactory};
pub use repositories::{FsCookbookStore, JsonLockfileRepository};
