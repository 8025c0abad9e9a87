//! chefignore patterns
//!
//! A cookbook may carry a `chefignore` file listing paths that are not part of
//! the cookbook artifact. Patterns use gitignore semantics.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

/// Name of the ignore file at the cookbook root
pub const CHEFIGNORE_FILE: &str = "chefignore";

/// Maximum file size for `chefignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns loaded from a cookbook's `chefignore`.
#[derive(Debug, Clone)]
pub struct Chefignore {
    matcher: Gitignore,
    pattern_count: usize,
}

/// Errors that can occur when loading `chefignore`.
#[derive(Debug, Error)]
pub enum ChefignoreError {
    #[error("chefignore exceeds {}KB limit ({size} bytes): {}", limit / 1024, path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("chefignore has {count} patterns, exceeds {limit} limit: {}", path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },

    #[error("failed to build chefignore matcher: {0}")]
    BuildFailed(String),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Default for Chefignore {
    fn default() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }
}

impl Chefignore {
    /// Load `chefignore` from a cookbook directory.
    ///
    /// Returns an empty pattern set if the file doesn't exist.
    pub fn load(cookbook_dir: &Path) -> Result<Self, ChefignoreError> {
        let ignore_path = cookbook_dir.join(CHEFIGNORE_FILE);
        if !ignore_path.is_file() {
            return Ok(Self::default());
        }

        let metadata = fs::metadata(&ignore_path).map_err(|source| ChefignoreError::Io {
            path: ignore_path.clone(),
            source,
        })?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(ChefignoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path).map_err(|source| ChefignoreError::Io {
            path: ignore_path.clone(),
            source,
        })?;
        Self::from_content(cookbook_dir, &ignore_path, &content)
    }

    /// Parse patterns from string content.
    pub fn from_content(
        root: &Path,
        source_path: &Path,
        content: &str,
    ) -> Result<Self, ChefignoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(ChefignoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), trimmed) {
                return Err(ChefignoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| ChefignoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a path (relative to the cookbook root) is excluded.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}
