//! PolicyUploader port - sends a validated lock to the policy server
//!
//! The uploader is created from server configuration on first use, so a
//! push that fails before the upload step never builds an HTTP client.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::domain::entities::PolicyLock;
use crate::domain::ports::push_events::PushEventSink;
use crate::domain::value_objects::PolicyGroup;
use crate::error::BoxError;

/// Upload and connection errors
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("policy server URL is not configured")]
    MissingServerUrl,

    #[error("invalid policy server URL '{url}'")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("client name is not configured")]
    MissingClientName,

    #[error("client signing key is not configured")]
    MissingSigningKey,

    #[error("could not read signing key {}", path.display())]
    SigningKeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("signing key {} is not a base64-encoded 32-byte Ed25519 seed", path.display())]
    InvalidSigningKey { path: PathBuf },

    #[error("could not build HTTP client")]
    Client(#[source] BoxError),

    #[error("request {method} {url} failed")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("{method} {url} returned HTTP {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not encode request body")]
    Encode(#[source] serde_json::Error),
}

/// Transfers a validated lock and its cookbook artifacts to a policy group
pub trait PolicyUploader {
    fn upload(
        &self,
        lock: &PolicyLock,
        policy_group: &PolicyGroup,
        events: &dyn PushEventSink,
    ) -> Result<(), UploadError>;
}

/// Builds an uploader from server configuration
pub trait UploaderFactory {
    type Uploader: PolicyUploader;

    fn connect(&self, server: &ServerConfig) -> Result<Self::Uploader, UploadError>;
}
