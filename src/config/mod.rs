//! Configuration for policy-push
//!
//! Settings are layered, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (POLICY_PUSH_*)
//! 3. Project config (<root>/.policy-push/config.toml)
//! 4. User config (<config dir>/policy-push/config.toml)
//! 5. Built-in defaults

mod loader;
mod types;

pub use loader::{
    load_or_default, load_with_warnings, project_config_path, user_config_path,
    with_env_overrides, ConfigWarning, ENV_CACHE_PATH, ENV_CLIENT_KEY, ENV_CLIENT_NAME,
    ENV_SERVER_URL,
};
pub use types::{Config, ConfigError, ServerConfig, StorageSettings, DEFAULT_TIMEOUT_SECS};
