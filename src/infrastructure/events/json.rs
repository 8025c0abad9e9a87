//! JSON Event Sink
//!
//! Outputs push events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PushEvent, PushEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON form of a push event
fn event_json(event: PushEvent) -> serde_json::Value {
    match event {
        PushEvent::Started {
            lockfile,
            policy_group,
        } => serde_json::json!({
            "event": "start",
            "command": "push",
            "lockfile": lockfile.display().to_string(),
            "policy_group": policy_group,
        }),

        PushEvent::LockValidated {
            name,
            revision_id,
            cookbook_count,
        } => serde_json::json!({
            "event": "lock_validated",
            "command": "push",
            "policy": name,
            "revision_id": revision_id,
            "cookbook_count": cookbook_count,
        }),

        PushEvent::CookbookUpdated {
            name,
            previous,
            current,
        } => serde_json::json!({
            "event": "cookbook_updated",
            "command": "push",
            "cookbook": name,
            "previous_identifier": previous,
            "identifier": current,
        }),

        PushEvent::LockfileWritten { path } => serde_json::json!({
            "event": "lockfile_written",
            "command": "push",
            "path": path.display().to_string(),
        }),

        PushEvent::UploadStarted { name, policy_group } => serde_json::json!({
            "event": "upload_start",
            "command": "push",
            "policy": name,
            "policy_group": policy_group,
        }),

        PushEvent::ArtifactUploaded { name, identifier } => serde_json::json!({
            "event": "artifact_uploaded",
            "command": "push",
            "cookbook": name,
            "identifier": identifier,
        }),

        PushEvent::ArtifactSkipped { name, identifier } => serde_json::json!({
            "event": "artifact_skipped",
            "command": "push",
            "cookbook": name,
            "identifier": identifier,
        }),

        PushEvent::PolicyUploaded {
            name,
            revision_id,
            policy_group,
        } => serde_json::json!({
            "event": "policy_uploaded",
            "command": "push",
            "policy": name,
            "revision_id": revision_id,
            "policy_group": policy_group,
        }),

        PushEvent::Completed {
            name,
            revision_id,
            policy_group,
        } => serde_json::json!({
            "event": "complete",
            "command": "push",
            "status": "success",
            "policy": name,
            "revision_id": revision_id,
            "policy_group": policy_group,
        }),
    }
}

impl PushEventSink for JsonEventSink {
    fn on_event(&self, event: PushEvent) {
        self.write_event(event_json(event));
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
