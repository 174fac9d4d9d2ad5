//! Repository traits (ports) - define the interface for data access
//!
//! The vote engine and session tracker own the rules; the store behind these
//! traits owns persistence. Each method is a single statement against the
//! store, so callers are responsible for serializing multi-step sequences.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Reaction, Session, User};
use crate::error::DomainError;
use crate::value_objects::{ActivitySlot, Polarity, SubjectId, SubjectKind, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Reaction Repository
// ============================================================================

#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Insert a reaction row
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Delete the user's reaction on a subject.
    ///
    /// With `Some(polarity)` only a row of that polarity is removed; with
    /// `None` any row for the triple is removed. Returns the number of rows deleted.
    async fn delete(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Option<Polarity>,
    ) -> RepoResult<u64>;

    /// Swap the user's reaction on a subject for `reaction`, in one statement.
    ///
    /// Either the old row is gone and the new one is stored, or nothing changed.
    async fn replace(&self, reaction: &Reaction) -> RepoResult<()>;

    /// Count reactions of one polarity on a subject
    async fn count(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        polarity: Polarity,
    ) -> RepoResult<u64>;

    /// Check whether a reaction row exists for the triple and polarity
    async fn exists(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Polarity,
    ) -> RepoResult<bool>;

    /// Record that a user authored a subject
    async fn record_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<()>;

    /// Check whether a creator marker exists
    async fn is_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<bool>;
}

// ============================================================================
// Session Repository
// ============================================================================

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persist a new session
    async fn insert(&self, session: &Session) -> RepoResult<()>;

    /// Find session by its row uuid
    async fn find_by_uuid(&self, uuid: Uuid) -> RepoResult<Option<Session>>;

    /// Find session by the bearer cookie token
    async fn find_by_cookie(&self, cookie_token: &str) -> RepoResult<Option<Session>>;

    /// Overwrite the last-seen slot
    async fn update_last_seen(&self, uuid: Uuid, slot: ActivitySlot) -> RepoResult<()>;

    /// Delete one session, returning whether a row was removed
    async fn delete(&self, uuid: Uuid) -> RepoResult<bool>;

    /// Delete every session belonging to a user
    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64>;

    /// Delete all sessions
    async fn delete_all(&self) -> RepoResult<u64>;

    /// Every session joined with its user, paired with the last-seen slot
    async fn list_active_with_user(&self) -> RepoResult<Vec<(User, ActivitySlot)>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if a user id refers to a real user
    async fn exists(&self, id: UserId) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a user and return it with its assigned id
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;
}

// ============================================================================
// Subject Repository
// ============================================================================

#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// Check whether a post or thread exists
    async fn exists(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<bool>;

    /// Author of a post or thread
    async fn owner(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<Option<UserId>>;

    /// Create a thread and return its id
    async fn create_thread(&self, owner: UserId, title: &str) -> RepoResult<SubjectId>;

    /// Create a post in a thread and return its id.
    ///
    /// Fails with `SubjectNotFound` when the thread does not exist.
    async fn create_post(&self, thread: SubjectId, owner: UserId, body: &str)
        -> RepoResult<SubjectId>;
}
