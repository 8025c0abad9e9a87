//! Authenticated HTTP client
//!
//! Thin wrapper over `reqwest::blocking` that appends path segments to the
//! server URL and signs every request.

use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use super::signing::RequestSigner;
use crate::domain::ports::UploadError;

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client bound to one policy server and client identity
#[derive(Debug)]
pub struct AuthenticatedHttp {
    client: Client,
    base_url: Url,
    signer: RequestSigner,
}

impl AuthenticatedHttp {
    pub fn new(server_url: &str, signer: RequestSigner, timeout: Duration) -> Result<Self, UploadError> {
        let mut base_url = Url::parse(server_url).map_err(|source| UploadError::InvalidServerUrl {
            url: server_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(UploadError::InvalidServerUrl {
                url: server_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Client(Box::new(e)))?;

        Ok(Self {
            client,
            base_url,
            signer,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of `segments` appended under the server URL.
    ///
    /// Each segment is percent-encoded, so `/`, `?` and `#` stay inside it.
    /// `.` and `..` segments are dropped rather than resolved.
    pub fn url_for(&self, segments: &[&str]) -> Result<Url, UploadError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| UploadError::InvalidServerUrl {
                url: self.base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub fn get(&self, segments: &[&str]) -> Result<HttpResponse, UploadError> {
        self.send(Method::GET, segments, None)
    }

    pub fn put_json(&self, segments: &[&str], body: Vec<u8>) -> Result<HttpResponse, UploadError> {
        self.send(Method::PUT, segments, Some(body))
    }

    fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse, UploadError> {
        let url = self.url_for(segments)?;
        let payload = body.as_deref().unwrap_or_default();
        let headers = self
            .signer
            .sign(method.as_str(), url.path(), payload, Utc::now());

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(ACCEPT, "application/json");
        for (name, value) in headers {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        tracing::debug!(method = %method, url = %url, "sending request");
        let transport_error = |e: reqwest::Error| UploadError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source: Box::new(e),
        };
        let response = request.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;
        tracing::debug!(method = %method, url = %url, status, "received response");

        Ok(HttpResponse { status, body })
    }
}
