//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::infrastructure::fs::policy_push_home_dir;

use super::types::{Config, ConfigError};

pub const ENV_SERVER_URL: &str = "POLICY_PUSH_SERVER_URL";
pub const ENV_CLIENT_NAME: &str = "POLICY_PUSH_CLIENT_NAME";
pub const ENV_CLIENT_KEY: &str = "POLICY_PUSH_CLIENT_KEY";
pub const ENV_CACHE_PATH: &str = "POLICY_PUSH_CACHE_PATH";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config location under `root`
pub fn project_config_path(root: &Path) -> PathBuf {
    root.join(".policy-push/config.toml")
}

/// User config location, if a config directory can be resolved
pub fn user_config_path() -> Option<PathBuf> {
    dirs_config_dir().map(|dir| dir.join("policy-push/config.toml"))
}

/// Merge user config, project config, and environment over the defaults.
///
/// Missing files are skipped; a file that exists but cannot be read or
/// parsed is an error.
pub fn load_or_default(
    project_root: Option<&Path>,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let mut config = Config::default();
    let mut warnings = Vec::new();

    let candidates = user_config_path()
        .into_iter()
        .chain(project_root.map(project_config_path));
    for path in candidates {
        if !path.is_file() {
            continue;
        }
        tracing::debug!(path = %path.display(), "loading config");
        let (layer, layer_warnings) = load_with_warnings(&path)?;
        config = config.overlay(layer);
        warnings.extend(layer_warnings);
    }

    Ok((with_env_overrides(config, |key| std::env::var(key).ok()), warnings))
}

/// Apply environment overrides (POLICY_PUSH_* variables).
///
/// `lookup` resolves a variable name; empty values are ignored.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = var(ENV_SERVER_URL) {
        config.server.url = Some(url);
    }
    if let Some(name) = var(ENV_CLIENT_NAME) {
        config.server.client_name = Some(name);
    }
    if let Some(key) = var(ENV_CLIENT_KEY) {
        config.server.client_key = Some(PathBuf::from(key));
    }
    if let Some(cache) = var(ENV_CACHE_PATH) {
        config.storage.cache_path = Some(PathBuf::from(cache));
    }

    config
}

/// Get XDG config directory
fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| policy_push_home_dir().map(|home| home.join(".config")))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "server",
        "url",
        "client_name",
        "client_key",
        "timeout_secs",
        "storage",
        "cache_path",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
