//! Service context - dependency container for services
//!
//! Holds the repositories, the clock, the per-key locks and the tunables
//! every service call needs. Cloning is cheap; clones share locks.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use forum_common::AppConfig;
use forum_core::traits::{
    ReactionRepository, RepoResult, SessionRepository, SubjectRepository, UserRepository,
};
use forum_core::{DomainError, SubjectId, SubjectKind, UserId};

use super::clock::{Clock, SystemClock};
use super::error::{ServiceError, ServiceResult};
use super::locks::KeyedLocks;

/// Identity a vote is serialized on
pub type VoteKey = (SubjectKind, SubjectId, UserId);

/// Tunables for the vote engine and session tracker
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    /// Upper bound on any single store call
    pub store_timeout: Duration,
    /// Minimum minutes between last-seen writes for one session
    pub refresh_minutes: u32,
    /// Default "online" window
    pub online_threshold_minutes: u32,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
            refresh_minutes: 5,
            online_threshold_minutes: 5,
        }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            store_timeout: config.store.timeout(),
            refresh_minutes: config.session.refresh_minutes,
            online_threshold_minutes: config.session.online_threshold_minutes,
        }
    }
}

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    reaction_repo: Arc<dyn ReactionRepository>,
    subject_repo: Arc<dyn SubjectRepository>,

    clock: Arc<dyn Clock>,
    settings: ServiceSettings,

    // Locks
    vote_locks: Arc<KeyedLocks<VoteKey>>,
    session_locks: Arc<KeyedLocks<Uuid>>,
    login_locks: Arc<KeyedLocks<UserId>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn SessionRepository>,
        reaction_repo: Arc<dyn ReactionRepository>,
        subject_repo: Arc<dyn SubjectRepository>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            reaction_repo,
            subject_repo,
            clock,
            settings,
            vote_locks: Arc::new(KeyedLocks::new()),
            session_locks: Arc::new(KeyedLocks::new()),
            login_locks: Arc::new(KeyedLocks::new()),
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the session repository
    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the reaction repository
    pub fn reaction_repo(&self) -> &dyn ReactionRepository {
        self.reaction_repo.as_ref()
    }

    /// Get the subject repository
    pub fn subject_repo(&self) -> &dyn SubjectRepository {
        self.subject_repo.as_ref()
    }

    // === Runtime ===

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub(crate) fn vote_locks(&self) -> &KeyedLocks<VoteKey> {
        &self.vote_locks
    }

    pub(crate) fn session_locks(&self) -> &KeyedLocks<Uuid> {
        &self.session_locks
    }

    pub(crate) fn login_locks(&self) -> &KeyedLocks<UserId> {
        &self.login_locks
    }

    /// Run one store call under the configured timeout.
    ///
    /// Elapsed calls become [`DomainError::StoreUnavailable`]; the caller decides
    /// whether to retry.
    pub async fn store<T, F>(&self, op: &'static str, call: F) -> RepoResult<T>
    where
        F: Future<Output = RepoResult<T>>,
    {
        match tokio::time::timeout(self.settings.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::StoreUnavailable(format!(
                "{op} timed out after {}ms",
                self.settings.store_timeout.as_millis()
            ))),
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("settings", &self.settings)
            .field("held_vote_locks", &self.vote_locks.len())
            .field("held_session_locks", &self.session_locks.len())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    reaction_repo: Option<Arc<dyn ReactionRepository>>,
    subject_repo: Option<Arc<dyn SubjectRepository>>,
    clock: Option<Arc<dyn Clock>>,
    settings: ServiceSettings,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn reaction_repo(mut self, repo: Arc<dyn ReactionRepository>) -> Self {
        self.reaction_repo = Some(repo);
        self
    }

    pub fn subject_repo(mut self, repo: Arc<dyn SubjectRepository>) -> Self {
        self.subject_repo = Some(repo);
        self
    }

    /// Use one store for every repository
    pub fn store<S>(self, store: S) -> Self
    where
        S: UserRepository
            + SessionRepository
            + ReactionRepository
            + SubjectRepository
            + Clone
            + 'static,
    {
        self.user_repo(Arc::new(store.clone()))
            .session_repo(Arc::new(store.clone()))
            .reaction_repo(Arc::new(store.clone()))
            .subject_repo(Arc::new(store))
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn settings(mut self, settings: ServiceSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.session_repo.ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            self.reaction_repo.ok_or_else(|| ServiceError::validation("reaction_repo is required"))?,
            self.subject_repo.ok_or_else(|| ServiceError::validation("subject_repo is required"))?,
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.settings,
        ))
    }
}
