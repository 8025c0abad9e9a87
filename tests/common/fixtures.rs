//! Test fixtures - reusable content for push tests.

/// Base64 seed of the signing key used by every test client
pub const CLIENT_KEY: &str = "CQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQk=";

/// `metadata.json` of the local `web_app` cookbook
pub const WEB_APP_METADATA: &str = r#"{"name": "web_app", "version": "0.3.0"}"#;

/// Default recipe of the local `web_app` cookbook
pub const WEB_APP_RECIPE: &str = "package 'nginx'\nservice 'nginx' do\n  action :start\nend\n";

/// `metadata.json` of the cached `nginx` cookbook
pub const NGINX_METADATA: &str = r#"{"name": "nginx", "version": "2.7.6"}"#;

/// Default recipe of the cached `nginx` cookbook
pub const NGINX_RECIPE: &str = "package 'nginx'\n";

/// Identifier a stale lock records for `web_app`
pub const STALE_WEB_APP_ID: &str = "0000000000000000000000000000000000000000";
