//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod cookbook;
mod lockfile;

pub use cookbook::FsCookbookStore;
pub use lockfile::{render_lock, JsonLockfileRepository};
