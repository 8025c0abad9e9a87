//! CookbookStore port - content profiles of cookbooks on disk
//!
//! Lock validation asks the store what a cookbook directory currently
//! contains and compares that with what the lock recorded.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::{ChefignoreError, CookbookIdentifier};

/// A file belonging to a cookbook artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookbookFile {
    /// Path relative to the cookbook root, `/`-separated
    pub path: String,
    /// Hex SHA-256 of the file content
    pub checksum: String,
}

/// Name and version declared in a cookbook's `metadata.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookMetadata {
    pub name: String,
    pub version: Option<String>,
}

/// What a cookbook directory contains right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookbookProfile {
    pub identifier: CookbookIdentifier,
    pub files: Vec<CookbookFile>,
    pub metadata: Option<CookbookMetadata>,
}

#[derive(Debug, Error)]
pub enum CookbookStoreError {
    #[error("could not walk cookbook directory {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("could not read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid cookbook metadata in {}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Chefignore(#[from] ChefignoreError),
}

/// Access to cookbook directories referenced by a lock
pub trait CookbookStore {
    /// Check whether the cookbook directory exists
    fn exists(&self, dir: &Path) -> bool;

    /// Compute the content profile of a cookbook directory
    fn profile(&self, dir: &Path) -> Result<CookbookProfile, CookbookStoreError>;
}
