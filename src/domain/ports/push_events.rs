//! Push Event Port
//!
//! Provides an observable interface for push operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

/// Event emitted during a push
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// Push started
    Started {
        lockfile: PathBuf,
        policy_group: String,
    },

    /// Lock data was rebuilt and every cookbook validated
    LockValidated {
        name: String,
        revision_id: String,
        cookbook_count: usize,
    },

    /// A local cookbook changed since the lock was written
    CookbookUpdated {
        name: String,
        previous: String,
        current: String,
    },

    /// The validated lock was written back to disk
    LockfileWritten { path: PathBuf },

    /// Upload to the policy group started
    UploadStarted { name: String, policy_group: String },

    /// A cookbook artifact was sent to the server
    ArtifactUploaded { name: String, identifier: String },

    /// The server already has this cookbook artifact
    ArtifactSkipped { name: String, identifier: String },

    /// The policy revision is now assigned to the group
    PolicyUploaded {
        name: String,
        revision_id: String,
        policy_group: String,
    },

    /// Push completed
    Completed {
        name: String,
        revision_id: String,
        policy_group: String,
    },
}

/// Trait for receiving push events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress lines in a terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait PushEventSink: Send + Sync {
    /// Handle a push event
    fn on_event(&self, event: PushEvent);

    /// Check if this sink wants per-artifact events
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl PushEventSink for NoopEventSink {
    fn on_event(&self, _event: PushEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
