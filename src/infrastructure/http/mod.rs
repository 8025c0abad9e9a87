//! Policy server HTTP access
//!
//! - `signing` - Ed25519 request signatures (`RequestSigner`)
//! - `client` - Signed blocking HTTP client (`AuthenticatedHttp`)
//! - `uploader` - PolicyUploader port implementation (`HttpPolicyUploader`)

mod client;
mod signing;
mod uploader;

pub use client::{AuthenticatedHttp, HttpResponse};
pub use signing::{canonical_request, content_hash, RequestSigner, SIGN_DESCRIPTION};
pub use uploader::{HttpPolicyUploader, HttpUploaderFactory};
