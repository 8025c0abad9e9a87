//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod chefignore;
mod identifier;
mod policy_group;
mod policy_paths;
mod storage_config;

pub use chefignore::{Chefignore, ChefignoreError, CHEFIGNORE_FILE};
pub use identifier::{sha256_hex, CookbookIdentifier};
pub use policy_group::{is_valid_object_name, PolicyGroup, PolicyGroupError};
pub use policy_paths::{lockfile_relative_path, PolicyPaths, DEFAULT_POLICYFILE};
pub use storage_config::StorageConfig;
