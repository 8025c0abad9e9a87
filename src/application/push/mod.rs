//! Push Module
//!
//! Sends a policy lock to a policy group on the policy server.
//!
//! ## Structure
//!
//! - `options` - Request type (`PushOptions`)
//! - `use_case` - Core use case logic (`PushUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use policy_push::application::push::{PushOptions, PushUseCase};
//!
//! let options = PushOptions::new(root, "staging".parse()?).with_server(server);
//! let use_case = PushUseCase::new(options, lockfile_repo, cookbook_store, uploader_factory);
//! use_case.run()?;
//! ```

mod options;
mod use_case;

pub use options::PushOptions;
pub use use_case::PushUseCase;
