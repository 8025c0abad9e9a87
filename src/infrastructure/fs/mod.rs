//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod home;
mod local;

pub use home::{default_cache_path, policy_push_home_dir, POLICY_PUSH_TEST_HOME_VAR};
pub use local::LocalFs;
