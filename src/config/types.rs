//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Policy server connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the policy server, e.g. `https://chef.example.com/organizations/acme`
    #[serde(default)]
    pub url: Option<String>,

    /// Client name requests are signed as
    #[serde(default)]
    pub client_name: Option<String>,

    /// File holding the base64 Ed25519 signing key seed
    #[serde(default)]
    pub client_key: Option<PathBuf>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Where cookbooks live on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Cookbook cache directory; defaults to `~/.chefdk/cache/cookbooks`
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Layer `other` on top of `self`; settings present in `other` win.
    pub fn overlay(mut self, other: Config) -> Config {
        if other.server.url.is_some() {
            self.server.url = other.server.url;
        }
        if other.server.client_name.is_some() {
            self.server.client_name = other.server.client_name;
        }
        if other.server.client_key.is_some() {
            self.server.client_key = other.server.client_key;
        }
        if other.server.timeout_secs.is_some() {
            self.server.timeout_secs = other.server.timeout_secs;
        }
        if other.storage.cache_path.is_some() {
            self.storage.cache_path = other.storage.cache_path;
        }
        self
    }
}
