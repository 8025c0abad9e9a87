//! Request signing
//!
//! Every request to the policy server is signed with the client's Ed25519
//! key. The signature covers a canonical description of the request:
//!
//! ```text
//! Method:PUT
//! Hashed Path:<base64 sha256 of the request path>
//! X-Ops-Content-Hash:<base64 sha256 of the body>
//! X-Ops-Timestamp:2024-05-01T12:00:00Z
//! X-Ops-UserId:<client name>
//! ```
//!
//! The base64 signature is sent split over `X-Ops-Authorization-N` headers.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::domain::ports::UploadError;

pub const HEADER_USER_ID: &str = "X-Ops-UserId";
pub const HEADER_TIMESTAMP: &str = "X-Ops-Timestamp";
pub const HEADER_CONTENT_HASH: &str = "X-Ops-Content-Hash";
pub const HEADER_SIGN: &str = "X-Ops-Sign";
pub const HEADER_AUTHORIZATION_PREFIX: &str = "X-Ops-Authorization-";

/// Value of the `X-Ops-Sign` header
pub const SIGN_DESCRIPTION: &str = "algorithm=ed25519;version=1.0";

/// Width of each `X-Ops-Authorization-N` header value
const AUTHORIZATION_CHUNK: usize = 60;

/// Signs requests on behalf of one client
pub struct RequestSigner {
    client_name: String,
    key: SigningKey,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("client_name", &self.client_name)
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    pub fn new(client_name: impl Into<String>, key: SigningKey) -> Self {
        Self {
            client_name: client_name.into(),
            key,
        }
    }

    /// Load the signing key from a file holding a base64 32-byte seed.
    pub fn from_key_file(client_name: impl Into<String>, path: &Path) -> Result<Self, UploadError> {
        let content = std::fs::read_to_string(path).map_err(|source| UploadError::SigningKeyRead {
            path: path.to_path_buf(),
            source,
        })?;
        let key = parse_signing_key(&content).ok_or_else(|| UploadError::InvalidSigningKey {
            path: path.to_path_buf(),
        })?;
        Ok(Self::new(client_name, key))
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Authentication headers for a request made at `timestamp`.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        body: &[u8],
        timestamp: DateTime<Utc>,
    ) -> Vec<(String, String)> {
        let content_hash = content_hash(body);
        let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        let canonical = canonical_request(method, path, &content_hash, &timestamp, &self.client_name);
        let signature = BASE64.encode(self.key.sign(canonical.as_bytes()).to_bytes());

        let mut headers = vec![
            (HEADER_USER_ID.to_string(), self.client_name.clone()),
            (HEADER_TIMESTAMP.to_string(), timestamp),
            (HEADER_CONTENT_HASH.to_string(), content_hash),
            (HEADER_SIGN.to_string(), SIGN_DESCRIPTION.to_string()),
        ];
        for (i, chunk) in signature.as_bytes().chunks(AUTHORIZATION_CHUNK).enumerate() {
            headers.push((
                format!("{}{}", HEADER_AUTHORIZATION_PREFIX, i + 1),
                String::from_utf8_lossy(chunk).into_owned(),
            ));
        }
        headers
    }
}

fn parse_signing_key(content: &str) -> Option<SigningKey> {
    let bytes = BASE64.decode(content.trim()).ok()?;
    let seed: [u8; 32] = bytes.try_into().ok()?;
    Some(SigningKey::from_bytes(&seed))
}

/// Base64 SHA-256 of a request body
pub fn content_hash(body: &[u8]) -> String {
    BASE64.encode(Sha256::digest(body))
}

/// The string a request signature covers
pub fn canonical_request(
    method: &str,
    path: &str,
    content_hash: &str,
    timestamp: &str,
    user_id: &str,
) -> String {
    let hashed_path = BASE64.encode(Sha256::digest(canonical_path(path).as_bytes()));
    format!(
        "Method:{}\nHashed Path:{}\nX-Ops-Content-Hash:{}\nX-Ops-Timestamp:{}\nX-Ops-UserId:{}",
        method.to_ascii_uppercase(),
        hashed_path,
        content_hash,
        timestamp,
        user_id
    )
}

/// Collapse repeated slashes and drop a trailing slash
fn canonical_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    if out.len() > 1 && out.ends_with('/') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ed25519_dalek::{Signature, Verifier};
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn signer() -> RequestSigner {
        RequestSigner::new("deployer", SigningKey::from_bytes(&[7u8; 32]))
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn sign_emits_standard_headers() {
        let headers: HashMap<String, String> = signer()
            .sign("put", "/policy_groups/prod/policies/web", b"{}", timestamp())
            .into_iter()
            .collect();

        assert_eq!(headers[HEADER_USER_ID], "deployer");
        assert_eq!(headers[HEADER_TIMESTAMP], "2024-05-01T12:00:00Z");
        assert_eq!(headers[HEADER_CONTENT_HASH], content_hash(b"{}"));
        assert_eq!(headers[HEADER_SIGN], SIGN_DESCRIPTION);
        // 64-byte signature is 88 base64 chars: two header chunks
        assert_eq!(headers["X-Ops-Authorization-1"].len(), 60);
        assert_eq!(headers["X-Ops-Authorization-2"].len(), 28);
        assert!(!headers.contains_key("X-Ops-Authorization-3"));
    }

    #[test]
    fn signature_verifies_against_canonical_request() {
        let signer = signer();
        let headers = signer.sign("GET", "/cookbook_artifacts/nginx/abc", b"", timestamp());

        let signature_b64: String = headers
            .iter()
            .filter(|(name, _)| name.starts_with(HEADER_AUTHORIZATION_PREFIX))
            .map(|(_, value)| value.as_str())
            .collect();
        let bytes: [u8; 64] = BASE64.decode(signature_b64).unwrap().try_into().unwrap();
        let signature = Signature::from_bytes(&bytes);

        let canonical = canonical_request(
            "GET",
            "/cookbook_artifacts/nginx/abc",
            &content_hash(b""),
            "2024-05-01T12:00:00Z",
            "deployer",
        );
        assert!(signer
            .verifying_key()
            .verify(canonical.as_bytes(), &signature)
            .is_ok());
    }

    #[test]
    fn canonical_request_normalizes_path() {
        let a = canonical_request("get", "//organizations//acme/", "h", "t", "u");
        let b = canonical_request("GET", "/organizations/acme", "h", "t", "u");

        assert_eq!(a, b);
        assert!(a.starts_with("Method:GET\nHashed Path:"));
        assert!(a.ends_with("\nX-Ops-Content-Hash:h\nX-Ops-Timestamp:t\nX-Ops-UserId:u"));
    }

    #[test]
    fn content_hash_is_base64_sha256() {
        // sha256("") = e3b0c442...
        assert_eq!(
            content_hash(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn from_key_file_reads_base64_seed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("deployer.key");
        std::fs::write(&path, format!("{}\n", BASE64.encode([7u8; 32]))).unwrap();

        let loaded = RequestSigner::from_key_file("deployer", &path).unwrap();

        assert_eq!(loaded.verifying_key(), signer().verifying_key());
        assert_eq!(loaded.client_name(), "deployer");
    }

    #[test]
    fn from_key_file_rejects_bad_keys() {
        let dir = tempdir().unwrap();
        let short = dir.path().join("short.key");
        std::fs::write(&short, BASE64.encode([1u8; 16])).unwrap();

        assert!(matches!(
            RequestSigner::from_key_file("c", &short),
            Err(UploadError::InvalidSigningKey { .. })
        ));
        assert!(matches!(
            RequestSigner::from_key_file("c", &dir.path().join("missing.key")),
            Err(UploadError::SigningKeyRead { .. })
        ));
    }

    #[test]
    fn debug_does_not_print_key_material() {
        let rendered = format!("{:?}", signer());
        assert!(rendered.contains("deployer"));
        assert!(!rendered.contains("key:"));
    }
}
