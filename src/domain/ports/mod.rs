//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cookbook_store;
pub mod file_system;
pub mod lockfile_repository;
pub mod policy_uploader;
pub mod push_events;

pub use cookbook_store::{
    CookbookFile, CookbookMetadata, CookbookProfile, CookbookStore, CookbookStoreError,
};
pub use file_system::{FileSystem, FsError, FsResult};
pub use lockfile_repository::{LockfileError, LockfileRepository, LockfileResult};
pub use policy_uploader::{PolicyUploader, UploadError, UploaderFactory};
pub use push_events::{NoopEventSink, PushEvent, PushEventSink};
