//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the Windows system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `policy_push_home_dir()` checks `POLICY_PUSH_TEST_HOME` first and falls
//! back to `dirs::home_dir()`.
//!
//! Use it for every functional path under the home directory: the default
//! cookbook cache and the user config location.

use std::path::{Path, PathBuf};

/// Environment variable for test isolation of home directory.
pub const POLICY_PUSH_TEST_HOME_VAR: &str = "POLICY_PUSH_TEST_HOME";

/// Cookbook cache location relative to the home directory
const COOKBOOK_CACHE_DIR: &str = ".chefdk/cache/cookbooks";

/// Get the home directory for policy-push paths.
///
/// # Returns
///
/// - `Some(PathBuf)` - The home directory path
/// - `None` - If neither `POLICY_PUSH_TEST_HOME` is set nor system home can be resolved
pub fn policy_push_home_dir() -> Option<PathBuf> {
    resolve_home(std::env::var(POLICY_PUSH_TEST_HOME_VAR).ok(), dirs::home_dir)
}

/// Cookbook cache used when none is configured (`~/.chefdk/cache/cookbooks`).
///
/// Falls back to a path relative to the working directory when no home
/// directory can be resolved.
pub fn default_cache_path() -> PathBuf {
    cache_path_under(policy_push_home_dir().as_deref())
}

fn resolve_home<F>(test_home: Option<String>, system_home: F) -> Option<PathBuf>
where
    F: FnOnce() -> Option<PathBuf>,
{
    test_home
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(system_home)
}

fn cache_path_under(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) => home.join(COOKBOOK_CACHE_DIR),
        None => PathBuf::from(COOKBOOK_CACHE_DIR),
    }
}
