//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{PushOptions, PushUseCase};
use crate::config::Config;
use crate::domain::value_objects::{PolicyGroup, PolicyGroupError};
use crate::infrastructure::{FsCookbookStore, HttpUploaderFactory, JsonLockfileRepository};

use super::cli::PushArgs;

/// Type alias for the concrete PushUseCase with all dependencies
pub type ConcretePushUseCase =
    PushUseCase<JsonLockfileRepository, FsCookbookStore, HttpUploaderFactory>;

/// Create a push use case backed by the local filesystem and the HTTP uploader
pub fn create_push_use_case(options: PushOptions) -> ConcretePushUseCase {
    PushUseCase::new(
        options,
        JsonLockfileRepository::new(),
        FsCookbookStore::new(),
        HttpUploaderFactory,
    )
}

/// Resolve push options from loaded configuration and command-line arguments.
///
/// Command-line values win over `config`, which already carries the
/// environment overrides.
pub fn build_options(config: Config, args: &PushArgs) -> Result<PushOptions, PolicyGroupError> {
    let policy_group = PolicyGroup::new(args.policy_group.as_str())?;

    let mut server = config.server;
    if let Some(url) = &args.server_url {
        server.url = Some(url.clone());
    }
    if let Some(name) = &args.client_name {
        server.client_name = Some(name.clone());
    }
    if let Some(key) = &args.client_key {
        server.client_key = Some(key.clone());
    }

    let mut options = PushOptions::new(args.root.clone(), policy_group).with_server(server);
    if let Some(policyfile) = &args.policyfile {
        options = options.with_policyfile(policyfile.as_str());
    }
    if let Some(cache) = args.cache_path.clone().or(config.storage.cache_path) {
        options = options.with_cache_path(cache);
    }
    Ok(options)
}
