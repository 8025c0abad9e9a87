//! Property tests for policy-push.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "order does not matter".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/policy_paths.rs"]
mod policy_paths;

#[path = "properties/run_list.rs"]
mod run_list;

#[path = "properties/identifiers.rs"]
mod identifiers;
