//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `LockDocument` - Raw JSON object read from a lockfile
//! - `PolicyLock` - A policy lock rebuilt from lockfile data
//! - `CookbookLock` - One locked cookbook and where its files live

mod cookbook_lock;
mod lock_document;
mod policy_lock;

pub use cookbook_lock::{CookbookLock, CookbookLockData, CookbookSource, CookbookUpdate};
pub use lock_document::LockDocument;
pub use policy_lock::{LockDataError, PolicyLock, PolicyLockData, RunListItem};
