//! Policy group value object
//!
//! A policy group names the deployment stage a lock is pushed to
//! (`staging`, `production`, ...). The server accepts letters, digits,
//! `_`, `-`, `.` and `:`. The same rule applies to policy and cookbook
//! names, which end up as path segments of server URLs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Validated policy group name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PolicyGroup(String);

/// Rejected policy group names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyGroupError {
    #[error("policy group name must not be empty")]
    Empty,

    #[error("invalid character '{ch}' in policy group name '{name}'")]
    InvalidCharacter { name: String, ch: char },

    #[error("'{0}' is not a usable policy group name")]
    Reserved(String),
}

impl PolicyGroup {
    pub fn new(name: impl Into<String>) -> Result<Self, PolicyGroupError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PolicyGroupError::Empty);
        }
        if let Some(ch) = name.chars().find(|c| !is_allowed(*c)) {
            return Err(PolicyGroupError::InvalidCharacter { name, ch });
        }
        if is_dot_segment(&name) {
            return Err(PolicyGroupError::Reserved(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

fn is_dot_segment(name: &str) -> bool {
    matches!(name, "." | "..")
}

/// Whether `name` is safe as a single server path segment.
///
/// Non-empty, only characters a policy group allows, and not `.` or `..`.
pub fn is_valid_object_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_allowed) && !is_dot_segment(name)
}

impl fmt::Display for PolicyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PolicyGroup {
    type Err = PolicyGroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PolicyGroup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
