//! Push Options
//!
//! Everything one push needs to know, fixed for the lifetime of the push.

use std::path::PathBuf;

use crate::config::ServerConfig;
use crate::domain::value_objects::{PolicyGroup, PolicyPaths};

/// Options for the push use case
#[derive(Debug, Clone)]
pub struct PushOptions {
    /// Directory the policy file path is relative to
    pub root_dir: PathBuf,
    /// Policy file path relative to `root_dir` (defaults to `Policyfile.rb`)
    pub policyfile: Option<String>,
    /// Group the policy revision is assigned to
    pub policy_group: PolicyGroup,
    /// Policy server connection settings
    pub server: ServerConfig,
    /// Cookbook cache override (defaults to `~/.chefdk/cache/cookbooks`)
    pub cache_path: Option<PathBuf>,
}

impl PushOptions {
    pub fn new(root_dir: impl Into<PathBuf>, policy_group: PolicyGroup) -> Self {
        Self {
            root_dir: root_dir.into(),
            policyfile: None,
            policy_group,
            server: ServerConfig::default(),
            cache_path: None,
        }
    }

    pub fn with_policyfile(mut self, policyfile: impl Into<String>) -> Self {
        self.policyfile = Some(policyfile.into());
        self
    }

    pub fn with_server(mut self, server: ServerConfig) -> Self {
        self.server = server;
        self
    }

    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(cache_path.into());
        self
    }

    /// Path resolution for the policy file and its lockfile
    pub fn paths(&self) -> PolicyPaths {
        PolicyPaths::new(self.root_dir.clone(), self.policyfile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn push_options_defaults_to_policyfile_rb() {
        let options = PushOptions::new("/srv/app", "staging".parse().unwrap());

        assert_eq!(
            options.paths().lockfile_path(),
            Path::new("/srv/app/Policyfile.lock.json")
        );
        assert!(options.cache_path.is_none());
    }

    #[test]
    fn push_options_builders() {
        let options = PushOptions::new("/srv/app", "prod".parse().unwrap())
            .with_policyfile("policies/web.rb")
            .with_cache_path("/tmp/cache");

        assert_eq!(
            options.paths().lockfile_path(),
            Path::new("/srv/app/policies/web.lock.json")
        );
        assert_eq!(options.cache_path.as_deref(), Some(Path::new("/tmp/cache")));
        assert_eq!(options.policy_group.as_str(), "prod");
    }
}
