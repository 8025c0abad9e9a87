//! Cookbook lock entity
//!
//! One entry of a policy lock's `cookbook_locks`: the exact version and
//! content identifier of a cookbook, and where its files come from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::policy_lock::NAME_RULE;
use super::LockDataError;
use crate::domain::ports::{CookbookFile, CookbookStore};
use crate::domain::value_objects::{is_valid_object_name, CookbookIdentifier, StorageConfig};

/// Persisted form of a cookbook lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CookbookLockData {
    pub version: String,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotted_decimal_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_options: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scm_info: Option<Value>,
}

/// Where a locked cookbook's files live
#[derive(Debug, Clone, PartialEq)]
pub enum CookbookSource {
    /// Fetched from a remote source into the cookbook cache
    Cached {
        cache_key: String,
        origin: Option<String>,
        source_options: Option<Value>,
    },
    /// Developed alongside the policy, path relative to the lockfile
    Local {
        path: String,
        scm_info: Option<Value>,
    },
}

/// Identifier change of a local cookbook found during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookUpdate {
    pub name: String,
    pub previous: CookbookIdentifier,
    pub current: CookbookIdentifier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CookbookLock {
    name: String,
    version: String,
    identifier: CookbookIdentifier,
    dotted_decimal_identifier: Option<String>,
    source: CookbookSource,
    install_path: PathBuf,
    files: Vec<CookbookFile>,
}

impl CookbookLock {
    pub fn from_lock_data(
        name: &str,
        data: &CookbookLockData,
        storage: &StorageConfig,
    ) -> Result<Self, LockDataError> {
        if data.version.trim().is_empty() {
            return Err(LockDataError::invalid_field(
                format!("cookbook_locks.{}.version", name),
                "must not be empty",
            ));
        }
        if data.identifier.trim().is_empty() {
            return Err(LockDataError::invalid_field(
                format!("cookbook_locks.{}.identifier", name),
                "must not be empty",
            ));
        }
        if !is_valid_object_name(name) {
            return Err(LockDataError::invalid_field(
                format!("cookbook_locks.{}", name),
                NAME_RULE,
            ));
        }
        if !is_valid_object_name(&data.identifier) {
            return Err(LockDataError::invalid_field(
                format!("cookbook_locks.{}.identifier", name),
                NAME_RULE,
            ));
        }

        let (source, install_path) = match (&data.cache_key, &data.source) {
            (Some(cache_key), None) => (
                CookbookSource::Cached {
                    cache_key: cache_key.clone(),
                    origin: data.origin.clone(),
                    source_options: data.source_options.clone(),
                },
                storage.cached_cookbook_dir(cache_key),
            ),
            (None, Some(path)) => (
                CookbookSource::Local {
                    path: path.clone(),
                    scm_info: data.scm_info.clone(),
                },
                storage.local_cookbook_dir(path),
            ),
            _ => {
                return Err(LockDataError::AmbiguousCookbookSource {
                    name: name.to_string(),
                })
            }
        };

        Ok(Self {
            name: name.to_string(),
            version: data.version.clone(),
            identifier: CookbookIdentifier::new(data.identifier.as_str()),
            dotted_decimal_identifier: data.dotted_decimal_identifier.clone(),
            source,
            install_path,
            files: Vec::new(),
        })
    }

    /// Check the cookbook on disk still matches the lock.
    ///
    /// Cached cookbooks must be byte-for-byte what was locked. Local
    /// cookbooks are expected to change; their identifier and version are
    /// refreshed and a [`CookbookUpdate`] is returned when the identifier moved.
    pub fn validate<S>(&mut self, store: &S) -> Result<Option<CookbookUpdate>, LockDataError>
    where
        S: CookbookStore + ?Sized,
    {
        if !store.exists(&self.install_path) {
            return Err(LockDataError::CookbookNotFound {
                name: self.name.clone(),
                path: self.install_path.clone(),
            });
        }

        let profile = store
            .profile(&self.install_path)
            .map_err(|source| LockDataError::Profile {
                name: self.name.clone(),
                source,
            })?;

        match &self.source {
            CookbookSource::Cached { .. } => {
                if profile.identifier != self.identifier {
                    return Err(LockDataError::CachedCookbookModified {
                        name: self.name.clone(),
                        expected: self.identifier.to_string(),
                        actual: profile.identifier.to_string(),
                    });
                }
                self.files = profile.files;
                Ok(None)
            }
            CookbookSource::Local { .. } => {
                if let Some(metadata) = &profile.metadata {
                    if metadata.name != self.name {
                        return Err(LockDataError::CookbookNameMismatch {
                            expected: self.name.clone(),
                            found: metadata.name.clone(),
                            path: self.install_path.clone(),
                        });
                    }
                    if let Some(version) = &metadata.version {
                        self.version = version.clone();
                    }
                }

                let previous = std::mem::replace(&mut self.identifier, profile.identifier);
                if let Some(dotted) = self.identifier.dotted_decimal() {
                    self.dotted_decimal_identifier = Some(dotted);
                }
                self.files = profile.files;

                if previous == self.identifier {
                    Ok(None)
                } else {
                    Ok(Some(CookbookUpdate {
                        name: self.name.clone(),
                        previous,
                        current: self.identifier.clone(),
                    }))
                }
            }
        }
    }

    pub fn to_lock_data(&self) -> CookbookLockData {
        let mut data = CookbookLockData {
            version: self.version.clone(),
            identifier: self.identifier.to_string(),
            dotted_decimal_identifier: self.dotted_decimal_identifier.clone(),
            source: None,
            cache_key: None,
            origin: None,
            source_options: None,
            scm_info: None,
        };
        match &self.source {
            CookbookSource::Cached {
                cache_key,
                origin,
                source_options,
            } => {
                data.cache_key = Some(cache_key.clone());
                data.origin = origin.clone();
                data.source_options = source_options.clone();
            }
            CookbookSource::Local { path, scm_info } => {
                data.source = Some(path.clone());
                data.scm_info = scm_info.clone();
            }
        }
        data
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn identifier(&self) -> &CookbookIdentifier {
        &self.identifier
    }

    pub fn dotted_decimal_identifier(&self) -> Option<&str> {
        self.dotted_decimal_identifier.as_deref()
    }

    pub fn source(&self) -> &CookbookSource {
        &self.source
    }

    /// Directory the cookbook was resolved to
    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Files seen during validation; empty before validation
    pub fn files(&self) -> &[CookbookFile] {
        &self.files
    }
}
