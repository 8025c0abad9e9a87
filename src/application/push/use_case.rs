//! Push Use Case
//!
//! Orchestrates the push flow:
//! 1. Check the lockfile exists
//! 2. Read the lockfile and validate every locked cookbook
//! 3. Rewrite the lockfile with the validated lock
//! 4. Upload the lock to the policy group
//!
//! The lock data, the validated lock and the uploader are produced lazily
//! and at most once per use case. A failed step is terminal; nothing is
//! retried. If the upload fails the lockfile has already been rewritten.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use crate::domain::entities::{LockDocument, PolicyLock};
use crate::domain::ports::{
    CookbookStore, LockfileRepository, NoopEventSink, PolicyUploader, PushEvent, PushEventSink,
    UploadError, UploaderFactory,
};
use crate::domain::value_objects::{PolicyPaths, StorageConfig};
use crate::error::{BoxError, PushError, PushResult};
use crate::infrastructure::fs::default_cache_path;

use super::options::PushOptions;

/// Push use case - one instance per push
pub struct PushUseCase<LR, CS, UF>
where
    LR: LockfileRepository,
    CS: CookbookStore,
    UF: UploaderFactory,
{
    options: PushOptions,
    paths: PolicyPaths,
    lockfile_repo: LR,
    cookbook_store: CS,
    uploader_factory: UF,
    events: Arc<dyn PushEventSink>,
    policy_data: OnceCell<LockDocument>,
    storage_config: OnceCell<StorageConfig>,
    policy_lock: OnceCell<PolicyLock>,
    uploader: OnceCell<UF::Uploader>,
}

impl<LR, CS, UF> PushUseCase<LR, CS, UF>
where
    LR: LockfileRepository,
    CS: CookbookStore,
    UF: UploaderFactory,
{
    pub fn new(
        options: PushOptions,
        lockfile_repo: LR,
        cookbook_store: CS,
        uploader_factory: UF,
    ) -> Self {
        let paths = options.paths();
        Self {
            options,
            paths,
            lockfile_repo,
            cookbook_store,
            uploader_factory,
            events: Arc::new(NoopEventSink),
            policy_data: OnceCell::new(),
            storage_config: OnceCell::new(),
            policy_lock: OnceCell::new(),
            uploader: OnceCell::new(),
        }
    }

    /// Report progress to `events`
    pub fn with_events(mut self, events: Arc<dyn PushEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &PushOptions {
        &self.options
    }

    pub fn policyfile_path(&self) -> PathBuf {
        self.paths.policyfile_path()
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.paths.lockfile_path()
    }

    /// Storage layout used to find locked cookbooks
    pub fn storage_config(&self) -> &StorageConfig {
        self.storage_config.get_or_init(|| {
            let cache_path = self
                .options
                .cache_path
                .clone()
                .unwrap_or_else(default_cache_path);
            StorageConfig::new(cache_path).use_policyfile_lock(&self.lockfile_path())
        })
    }

    /// Raw lockfile content, read on first access
    pub fn policy_data(&self) -> PushResult<&LockDocument> {
        self.policy_data.get_or_try_init(|| {
            let path = self.lockfile_path();
            tracing::debug!(path = %path.display(), "reading lockfile");
            self.lockfile_repo.load(&path).map_err(|e| {
                PushError::policyfile_push(format!("Error reading lockfile {}", path.display()), e)
            })
        })
    }

    /// The lock rebuilt from [`policy_data`](Self::policy_data) with every
    /// cookbook validated, built on first access.
    pub fn policy_lock(&self) -> PushResult<&PolicyLock> {
        self.policy_lock.get_or_try_init(|| {
            self.build_policy_lock()
                .map_err(|e| PushError::policyfile_push("Invalid lockfile data", e))
        })
    }

    /// Run the push
    pub fn run(&self) -> PushResult<()> {
        let lockfile_path = self.lockfile_path();
        let policy_group = &self.options.policy_group;

        if !self.lockfile_repo.exists(&lockfile_path) {
            return Err(PushError::LockfileNotFound {
                path: lockfile_path,
            });
        }

        self.events.on_event(PushEvent::Started {
            lockfile: lockfile_path.clone(),
            policy_group: policy_group.to_string(),
        });

        let lock = self.policy_lock()?;

        self.lockfile_repo
            .save(lock, &lockfile_path)
            .map_err(|source| PushError::LockfileWrite {
                path: lockfile_path.clone(),
                source,
            })?;
        tracing::info!(path = %lockfile_path.display(), "lockfile rewritten");
        self.events.on_event(PushEvent::LockfileWritten {
            path: lockfile_path,
        });

        self.upload(lock).map_err(|e| {
            PushError::policyfile_push(
                format!("Failed to upload policy to policy group {}", policy_group),
                e,
            )
        })?;

        self.events.on_event(PushEvent::Completed {
            name: lock.name().to_string(),
            revision_id: lock.revision_id().to_string(),
            policy_group: policy_group.to_string(),
        });
        Ok(())
    }

    fn build_policy_lock(&self) -> Result<PolicyLock, BoxError> {
        let data = self.policy_data()?;
        let mut lock = PolicyLock::build_from_lock_data(self.storage_config(), data)?;
        let updates = lock.validate_cookbooks(&self.cookbook_store)?;

        for update in updates {
            tracing::info!(
                cookbook = %update.name,
                previous = %update.previous,
                current = %update.current,
                "local cookbook changed since lock"
            );
            self.events.on_event(PushEvent::CookbookUpdated {
                name: update.name,
                previous: update.previous.to_string(),
                current: update.current.to_string(),
            });
        }

        tracing::debug!(
            policy = lock.name(),
            revision_id = lock.revision_id(),
            "lock validated"
        );
        self.events.on_event(PushEvent::LockValidated {
            name: lock.name().to_string(),
            revision_id: lock.revision_id().to_string(),
            cookbook_count: lock.cookbook_locks().len(),
        });
        Ok(lock)
    }

    fn uploader(&self) -> Result<&UF::Uploader, UploadError> {
        self.uploader
            .get_or_try_init(|| self.uploader_factory.connect(&self.options.server))
    }

    fn upload(&self, lock: &PolicyLock) -> Result<(), UploadError> {
        let policy_group = &self.options.policy_group;
        self.events.on_event(PushEvent::UploadStarted {
            name: lock.name().to_string(),
            policy_group: policy_group.to_string(),
        });

        self.uploader()?
            .upload(lock, policy_group, self.events.as_ref())?;

        tracing::info!(
            policy = lock.name(),
            revision_id = lock.revision_id(),
            policy_group = %policy_group,
            "policy uploaded"
        );
        Ok(())
    }
}
