//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Progress and error output
//!
//! ## Usage
//!
//! ```ignore
//! use policy_push::presentation::factory;
//!
//! let options = factory::build_options(config, &args)?;
//! factory::create_push_use_case(options).run()?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, PushArgs};
pub use factory::{build_options, create_push_use_case, ConcretePushUseCase};
pub use output::{render_error, render_other_error, ConsoleEventSink, OutputFormat};
