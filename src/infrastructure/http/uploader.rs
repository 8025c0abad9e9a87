//! HTTP Policy Uploader
//!
//! Implements the PolicyUploader port against the policy server API:
//! cookbook artifacts the server lacks are created first, then the lock is
//! assigned to the policy group.

use serde::Serialize;

use super::client::{AuthenticatedHttp, HttpResponse};
use super::signing::RequestSigner;
use crate::config::ServerConfig;
use crate::domain::entities::{CookbookLock, PolicyLock};
use crate::domain::ports::{
    CookbookFile, PolicyUploader, PushEvent, PushEventSink, UploadError, UploaderFactory,
};
use crate::domain::value_objects::PolicyGroup;

/// Body of a cookbook artifact upload
#[derive(Debug, Serialize)]
struct ArtifactManifest<'a> {
    name: &'a str,
    version: &'a str,
    identifier: &'a str,
    files: &'a [CookbookFile],
}

/// Uploads policies over authenticated HTTP
#[derive(Debug)]
pub struct HttpPolicyUploader {
    http: AuthenticatedHttp,
}

impl HttpPolicyUploader {
    pub fn new(http: AuthenticatedHttp) -> Self {
        Self { http }
    }

    /// Make sure the server has the artifact for `cookbook`.
    ///
    /// Returns `true` if it had to be uploaded.
    fn ensure_artifact(&self, cookbook: &CookbookLock) -> Result<bool, UploadError> {
        let path = [
            "cookbook_artifacts",
            cookbook.name(),
            cookbook.identifier().as_str(),
        ];

        let existing = self.http.get(&path)?;
        if existing.is_success() {
            return Ok(false);
        }
        if existing.status != 404 {
            return Err(self.status_error("GET", &path, existing));
        }

        let manifest = ArtifactManifest {
            name: cookbook.name(),
            version: cookbook.version(),
            identifier: cookbook.identifier().as_str(),
            files: cookbook.files(),
        };
        let body = serde_json::to_vec(&manifest).map_err(UploadError::Encode)?;
        let created = self.http.put_json(&path, body)?;
        if !created.is_success() {
            return Err(self.status_error("PUT", &path, created));
        }
        Ok(true)
    }

    fn status_error(&self, method: &str, path: &[&str], response: HttpResponse) -> UploadError {
        let url = self
            .http
            .url_for(path)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| path.join("/"));
        UploadError::Status {
            method: method.to_string(),
            url,
            status: response.status,
            body: response.body,
        }
    }
}

impl PolicyUploader for HttpPolicyUploader {
    fn upload(
        &self,
        lock: &PolicyLock,
        policy_group: &PolicyGroup,
        events: &dyn PushEventSink,
    ) -> Result<(), UploadError> {
        let detailed = events.wants_detailed_events();

        for cookbook in lock.cookbook_locks().values() {
            let uploaded = self.ensure_artifact(cookbook)?;
            tracing::debug!(
                cookbook = cookbook.name(),
                identifier = %cookbook.identifier(),
                uploaded,
                "cookbook artifact ready"
            );
            if detailed {
                let name = cookbook.name().to_string();
                let identifier = cookbook.identifier().to_string();
                events.on_event(if uploaded {
                    PushEvent::ArtifactUploaded { name, identifier }
                } else {
                    PushEvent::ArtifactSkipped { name, identifier }
                });
            }
        }

        let path = [
            "policy_groups",
            policy_group.as_str(),
            "policies",
            lock.name(),
        ];
        let body = serde_json::to_vec(&lock.to_lock()).map_err(UploadError::Encode)?;
        let response = self.http.put_json(&path, body)?;
        if !response.is_success() {
            return Err(self.status_error("PUT", &path, response));
        }

        events.on_event(PushEvent::PolicyUploaded {
            name: lock.name().to_string(),
            revision_id: lock.revision_id().to_string(),
            policy_group: policy_group.to_string(),
        });
        Ok(())
    }
}

/// Connects [`HttpPolicyUploader`]s from server configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpUploaderFactory;

impl UploaderFactory for HttpUploaderFactory {
    type Uploader = HttpPolicyUploader;

    fn connect(&self, server: &ServerConfig) -> Result<HttpPolicyUploader, UploadError> {
        let url = server
            .url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(UploadError::MissingServerUrl)?;
        let client_name = server
            .client_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(UploadError::MissingClientName)?;
        let key_path = server
            .client_key
            .as_deref()
            .ok_or(UploadError::MissingSigningKey)?;

        let signer = RequestSigner::from_key_file(client_name, key_path)?;
        let http = AuthenticatedHttp::new(url, signer, server.timeout())?;
        tracing::debug!(server = %http.base_url(), client = client_name, "connected uploader");
        Ok(HttpPolicyUploader::new(http))
    }
}
