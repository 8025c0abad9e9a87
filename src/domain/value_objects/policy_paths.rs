//! Policy file and lockfile path derivation
//!
//! The lockfile sits next to its policy file: `Policyfile.rb` locks to
//! `Policyfile.lock.json`, `policies/app.rb` to `policies/app.lock.json`.
//! A relative root is anchored at the current directory once, on
//! construction, so both derived paths are absolute. After that everything
//! is lexical; nothing touches the file system.

use std::path::{Component, Path, PathBuf};

/// Policy file used when none is given
pub const DEFAULT_POLICYFILE: &str = "Policyfile.rb";

const POLICYFILE_EXTENSION: &str = ".rb";
const LOCKFILE_SUFFIX: &str = ".lock.json";

/// Paths of a policy file and its lockfile under a root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyPaths {
    root: PathBuf,
    relative: Option<String>,
}

impl PolicyPaths {
    pub fn new(root: impl Into<PathBuf>, policyfile: Option<String>) -> Self {
        Self {
            root: absolute_root(root.into()),
            relative: policyfile,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative policy file path, falling back to `Policyfile.rb`.
    pub fn policyfile_relative_path(&self) -> &str {
        self.relative.as_deref().unwrap_or(DEFAULT_POLICYFILE)
    }

    pub fn policyfile_path(&self) -> PathBuf {
        normalize(&self.root.join(self.policyfile_relative_path()))
    }

    /// Relative lockfile path: one trailing `.rb` stripped, `.lock.json` appended.
    pub fn lockfile_relative_path(&self) -> String {
        lockfile_relative_path(self.policyfile_relative_path())
    }

    pub fn lockfile_path(&self) -> PathBuf {
        normalize(&self.root.join(self.lockfile_relative_path()))
    }
}

/// Derive the lockfile name for a policy file name.
pub fn lockfile_relative_path(policyfile: &str) -> String {
    let stem = policyfile
        .strip_suffix(POLICYFILE_EXTENSION)
        .unwrap_or(policyfile);
    format!("{}{}", stem, LOCKFILE_SUFFIX)
}

/// Anchor a relative root at the current directory.
///
/// If the current directory is unavailable the root is kept as given.
fn absolute_root(root: PathBuf) -> PathBuf {
    if root.is_absolute() {
        return root;
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(root)),
        Err(_) => root,
    }
}

/// Resolve `.` and `..` components without consulting the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
