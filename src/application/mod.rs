//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `PushUseCase` - Validates a policy lock, rewrites it, and uploads it to a policy group

pub mod push;

pub use push::{PushOptions, PushUseCase};
