//! Common test utilities for policy-push integration tests.
//!
//! - `TestEnv`: isolated project and HOME directories plus CLI helpers
//! - Fixtures: cookbook and key content shared by tests

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
