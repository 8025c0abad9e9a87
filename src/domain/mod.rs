//! Domain Layer
//!
//! The core of policy-push: the policy lock model and the ports it talks through.
//!
//! ## Structure
//!
//! - `entities/` - Policy lock, cookbook locks, raw lock documents
//! - `value_objects/` - Immutable value types (paths, policy group, identifiers)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or network directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
