//! Policy lock entity
//!
//! The structured form of a `Policyfile.lock.json`: the policy name, its
//! run lists, and the exact cookbooks they resolve to. A lock is built from
//! a raw [`LockDocument`], then every cookbook is re-validated against what
//! is on disk before the lock is written back or uploaded.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::cookbook_lock::{CookbookLock, CookbookLockData, CookbookUpdate};
use super::lock_document::LockDocument;
use crate::domain::ports::{CookbookStore, CookbookStoreError};
use crate::domain::value_objects::{is_valid_object_name, sha256_hex, StorageConfig};

/// Reasons a lock cannot be rebuilt or fails validation
#[derive(Debug, Error)]
pub enum LockDataError {
    #[error("lockfile data is malformed")]
    Malformed(#[source] serde_json::Error),

    #[error("lockfile field '{field}' {problem}")]
    InvalidField { field: String, problem: String },

    #[error("invalid item '{item}' in {run_list}")]
    InvalidRunListItem { run_list: String, item: String },

    #[error("{run_list} uses cookbook '{cookbook}' which is not in cookbook_locks")]
    UnlockedCookbook { run_list: String, cookbook: String },

    #[error("cookbook '{name}' must have exactly one of 'cache_key' or 'source'")]
    AmbiguousCookbookSource { name: String },

    #[error("cookbook '{name}' not found at {}", path.display())]
    CookbookNotFound { name: String, path: PathBuf },

    #[error("could not inspect cookbook '{name}'")]
    Profile {
        name: String,
        #[source]
        source: CookbookStoreError,
    },

    #[error(
        "cached cookbook '{name}' has been modified: lock expects identifier {expected}, found {actual}"
    )]
    CachedCookbookModified {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("cookbook at {} is named '{found}' but locked as '{expected}'", path.display())]
    CookbookNameMismatch {
        expected: String,
        found: String,
        path: PathBuf,
    },

    #[error("could not encode policy lock")]
    Encode(#[source] serde_json::Error),
}

/// Problem reported for names that cannot be used as a server path segment
pub(crate) const NAME_RULE: &str =
    "may only contain letters, digits, '_', '-', '.' or ':' and must not be '.' or '..'";

impl LockDataError {
    pub(crate) fn invalid_field(field: impl Into<String>, problem: impl Into<String>) -> Self {
        LockDataError::InvalidField {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

/// Persisted (canonical) form of a policy lock
///
/// Field order here is the key order of the written lockfile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyLockData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    pub name: String,
    pub run_list: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub named_run_lists: BTreeMap<String, Vec<String>>,
    pub cookbook_locks: BTreeMap<String, CookbookLockData>,
    #[serde(default = "empty_object")]
    pub default_attributes: Value,
    #[serde(default = "empty_object")]
    pub override_attributes: Value,
    #[serde(default = "empty_object")]
    pub solution_dependencies: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_policy_locks: Vec<Value>,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A recipe entry of a run list, always rendered as `recipe[cookbook::recipe]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunListItem {
    cookbook: String,
    recipe: String,
}

impl RunListItem {
    /// Parse `recipe[cb]`, `recipe[cb::recipe]`, `cb` or `cb::recipe`.
    ///
    /// Roles are expanded when a policy is compiled, so `role[...]` items
    /// never appear in a lock and are rejected here.
    pub fn parse(item: &str) -> Option<Self> {
        let item = item.trim();
        let inner = match item.strip_prefix("recipe[") {
            Some(rest) => rest.strip_suffix(']')?,
            None if item.contains(['[', ']']) => return None,
            None => item,
        };

        let (cookbook, recipe) = match inner.split_once("::") {
            Some((cookbook, recipe)) => (cookbook, recipe),
            None => (inner, "default"),
        };
        if !is_valid_name(cookbook) || !is_valid_name(recipe) {
            return None;
        }

        Some(Self {
            cookbook: cookbook.to_string(),
            recipe: recipe.to_string(),
        })
    }

    pub fn cookbook(&self) -> &str {
        &self.cookbook
    }

    pub fn recipe(&self) -> &str {
        &self.recipe
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl fmt::Display for RunListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recipe[{}::{}]", self.cookbook, self.recipe)
    }
}

/// A policy lock rebuilt from lockfile data
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyLock {
    name: String,
    revision_id: String,
    run_list: Vec<RunListItem>,
    named_run_lists: BTreeMap<String, Vec<RunListItem>>,
    cookbook_locks: BTreeMap<String, CookbookLock>,
    default_attributes: Value,
    override_attributes: Value,
    solution_dependencies: Value,
    included_policy_locks: Vec<Value>,
}

impl PolicyLock {
    /// Rebuild a lock from raw lockfile data.
    ///
    /// Cookbook sources are resolved against `storage`; nothing on disk is
    /// checked until [`PolicyLock::validate_cookbooks`].
    pub fn build_from_lock_data(
        storage: &StorageConfig,
        document: &LockDocument,
    ) -> Result<Self, LockDataError> {
        let data: PolicyLockData = serde_json::from_value(Value::Object(document.as_map().clone()))
            .map_err(LockDataError::Malformed)?;
        Self::from_data(storage, data)
    }

    fn from_data(storage: &StorageConfig, data: PolicyLockData) -> Result<Self, LockDataError> {
        if data.name.trim().is_empty() {
            return Err(LockDataError::invalid_field("name", "must not be empty"));
        }
        if !is_valid_object_name(&data.name) {
            return Err(LockDataError::invalid_field("name", NAME_RULE));
        }

        let run_list = parse_run_list("run_list", &data.run_list)?;
        let mut named_run_lists = BTreeMap::new();
        for (name, items) in &data.named_run_lists {
            let label = format!("named run list '{}'", name);
            named_run_lists.insert(name.clone(), parse_run_list(&label, items)?);
        }

        let mut cookbook_locks = BTreeMap::new();
        for (name, cookbook) in &data.cookbook_locks {
            cookbook_locks.insert(
                name.clone(),
                CookbookLock::from_lock_data(name, cookbook, storage)?,
            );
        }

        let all_run_lists = std::iter::once(("run_list".to_string(), &run_list)).chain(
            named_run_lists
                .iter()
                .map(|(name, items)| (format!("named run list '{}'", name), items)),
        );
        for (label, items) in all_run_lists {
            if let Some(item) = items
                .iter()
                .find(|item| !cookbook_locks.contains_key(item.cookbook()))
            {
                return Err(LockDataError::UnlockedCookbook {
                    run_list: label,
                    cookbook: item.cookbook().to_string(),
                });
            }
        }

        let mut lock = Self {
            name: data.name,
            revision_id: String::new(),
            run_list,
            named_run_lists,
            cookbook_locks,
            default_attributes: data.default_attributes,
            override_attributes: data.override_attributes,
            solution_dependencies: data.solution_dependencies,
            included_policy_locks: data.included_policy_locks,
        };
        lock.revision_id = match data.revision_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => lock.compute_revision_id()?,
        };
        Ok(lock)
    }

    /// Re-validate every locked cookbook against `store`.
    ///
    /// Returns the local cookbooks whose identifier changed. The revision id
    /// is recomputed afterwards so it reflects the refreshed content.
    pub fn validate_cookbooks<S>(&mut self, store: &S) -> Result<Vec<CookbookUpdate>, LockDataError>
    where
        S: CookbookStore + ?Sized,
    {
        let mut updates = Vec::new();
        for cookbook in self.cookbook_locks.values_mut() {
            if let Some(update) = cookbook.validate(store)? {
                updates.push(update);
            }
        }
        self.revision_id = self.compute_revision_id()?;
        Ok(updates)
    }

    /// Canonical lock representation, as written to the lockfile and uploaded.
    pub fn to_lock(&self) -> PolicyLockData {
        PolicyLockData {
            revision_id: Some(self.revision_id.clone()),
            name: self.name.clone(),
            run_list: self.run_list.iter().map(ToString::to_string).collect(),
            named_run_lists: self
                .named_run_lists
                .iter()
                .map(|(name, items)| {
                    (
                        name.clone(),
                        items.iter().map(ToString::to_string).collect(),
                    )
                })
                .collect(),
            cookbook_locks: self
                .cookbook_locks
                .iter()
                .map(|(name, cookbook)| (name.clone(), cookbook.to_lock_data()))
                .collect(),
            default_attributes: self.default_attributes.clone(),
            override_attributes: self.override_attributes.clone(),
            solution_dependencies: self.solution_dependencies.clone(),
            included_policy_locks: self.included_policy_locks.clone(),
        }
    }

    /// SHA-256 of the canonical content with the revision id left out
    fn compute_revision_id(&self) -> Result<String, LockDataError> {
        let mut data = self.to_lock();
        data.revision_id = None;
        let bytes = serde_json::to_vec(&data).map_err(LockDataError::Encode)?;
        Ok(sha256_hex(&bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn revision_id(&self) -> &str {
        &self.revision_id
    }

    pub fn run_list(&self) -> &[RunListItem] {
        &self.run_list
    }

    pub fn named_run_lists(&self) -> &BTreeMap<String, Vec<RunListItem>> {
        &self.named_run_lists
    }

    pub fn cookbook_locks(&self) -> &BTreeMap<String, CookbookLock> {
        &self.cookbook_locks
    }

    pub fn cookbook_lock(&self, name: &str) -> Option<&CookbookLock> {
        self.cookbook_locks.get(name)
    }

    pub fn default_attributes(&self) -> &Value {
        &self.default_attributes
    }

    pub fn override_attributes(&self) -> &Value {
        &self.override_attributes
    }
}

fn parse_run_list(label: &str, items: &[String]) -> Result<Vec<RunListItem>, LockDataError> {
    items
        .iter()
        .map(|item| {
            RunListItem::parse(item).ok_or_else(|| LockDataError::InvalidRunListItem {
                run_list: label.to_string(),
                item: item.clone(),
            })
        })
        .collect()
}
