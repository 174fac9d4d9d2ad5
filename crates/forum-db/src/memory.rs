//! In-memory store
//!
//! Implements every repository trait over process-local maps with the same
//! observable semantics as the PostgreSQL repositories (unique reaction per
//! subject and user, unique email, one session per user, inner-join listing).
//! Used by the service and HTTP tests.
//!
//! Clones share state, so one store can be handed out as all four repositories.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{Reaction, Session, User};
use forum_core::error::DomainError;
use forum_core::traits::{
    ReactionRepository, RepoResult, SessionRepository, SubjectRepository, UserRepository,
};
use forum_core::value_objects::{ActivitySlot, Polarity, SubjectId, SubjectKind, UserId};

type ReactionKey = (SubjectKind, SubjectId, UserId);

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, (User, String)>,
    next_user_id: i64,
    subjects: HashMap<(SubjectKind, SubjectId), UserId>,
    next_subject_id: i64,
    reactions: HashMap<ReactionKey, Reaction>,
    creators: HashSet<ReactionKey>,
    sessions: HashMap<Uuid, Session>,
}

impl Tables {
    fn insert_user(&mut self, name: &str, email: &str, password_hash: &str) -> User {
        self.next_user_id += 1;
        let user = User::new(
            UserId::new(self.next_user_id),
            name.to_string(),
            email.to_string(),
        );
        self.users
            .insert(user.id, (user.clone(), password_hash.to_string()));
        user
    }

    fn insert_subject(&mut self, kind: SubjectKind, owner: UserId) -> SubjectId {
        self.next_subject_id += 1;
        let id = SubjectId::new(self.next_subject_id);
        self.subjects.insert((kind, id), owner);
        id
    }
}

#[derive(Default)]
struct Shared {
    tables: Mutex<Tables>,
    latency: Mutex<Option<Duration>>,
    fail_last_seen_writes: AtomicBool,
    fail_reaction_writes: AtomicBool,
    last_seen_writes: AtomicUsize,
}

/// Process-local store implementing all repository traits
#[derive(Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly, bypassing registration
    pub fn add_user(&self, name: &str, email: &str, password_hash: &str) -> User {
        self.shared.tables.lock().insert_user(name, email, password_hash)
    }

    /// Insert a thread owned by `owner`, bypassing the subject service
    pub fn add_thread(&self, owner: UserId) -> SubjectId {
        self.shared.tables.lock().insert_subject(SubjectKind::Thread, owner)
    }

    /// Insert a post owned by `owner`, outside any thread
    pub fn add_post(&self, owner: UserId) -> SubjectId {
        self.shared.tables.lock().insert_subject(SubjectKind::Post, owner)
    }

    /// Delay every store call, for exercising call timeouts
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.shared.latency.lock() = latency;
    }

    /// Make `update_last_seen` fail until switched back
    pub fn fail_last_seen_writes(&self, fail: bool) {
        self.shared
            .fail_last_seen_writes
            .store(fail, Ordering::SeqCst);
    }

    /// Make reaction inserts, replaces and deletes fail until switched back
    pub fn fail_reaction_writes(&self, fail: bool) {
        self.shared.fail_reaction_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `update_last_seen` calls so far
    pub fn last_seen_writes(&self) -> usize {
        self.shared.last_seen_writes.load(Ordering::SeqCst)
    }

    /// Number of sessions currently stored for a user
    pub fn session_count(&self, user_id: UserId) -> usize {
        self.shared
            .tables
            .lock()
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .count()
    }

    /// Raw reaction rows for a subject, for invariant checks in tests
    pub fn reactions_on(&self, kind: SubjectKind, subject_id: SubjectId) -> Vec<Reaction> {
        self.shared
            .tables
            .lock()
            .reactions
            .values()
            .filter(|r| r.subject_kind == kind && r.subject_id == subject_id)
            .cloned()
            .collect()
    }

    fn check_reaction_write(&self) -> RepoResult<()> {
        if self.shared.fail_reaction_writes.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "reaction write rejected".to_string(),
            ));
        }
        Ok(())
    }

    async fn delay(&self) {
        let latency = *self.shared.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

// ============================================================================
// Reactions
// ============================================================================

#[async_trait]
impl ReactionRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        self.delay().await;
        self.check_reaction_write()?;
        let key = (reaction.subject_kind, reaction.subject_id, reaction.user_id);
        let mut tables = self.shared.tables.lock();
        if tables.reactions.contains_key(&key) {
            return Err(DomainError::Conflict(format!(
                "user {} already reacted to {} {}",
                reaction.user_id, reaction.subject_kind, reaction.subject_id
            )));
        }
        tables.reactions.insert(key, reaction.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn replace(&self, reaction: &Reaction) -> RepoResult<()> {
        self.delay().await;
        self.check_reaction_write()?;
        let key = (reaction.subject_kind, reaction.subject_id, reaction.user_id);
        self.shared
            .tables
            .lock()
            .reactions
            .insert(key, reaction.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Option<Polarity>,
    ) -> RepoResult<u64> {
        self.delay().await;
        self.check_reaction_write()?;
        let key = (kind, subject_id, user_id);
        let mut tables = self.shared.tables.lock();
        let matches = tables
            .reactions
            .get(&key)
            .is_some_and(|r| polarity.map_or(true, |p| r.polarity == p));
        if matches {
            tables.reactions.remove(&key);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    #[instrument(skip(self))]
    async fn count(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        polarity: Polarity,
    ) -> RepoResult<u64> {
        self.delay().await;
        let tables = self.shared.tables.lock();
        let count = tables
            .reactions
            .values()
            .filter(|r| r.subject_kind == kind && r.subject_id == subject_id)
            .filter(|r| r.polarity == polarity)
            .count();
        Ok(count as u64)
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Polarity,
    ) -> RepoResult<bool> {
        self.delay().await;
        let tables = self.shared.tables.lock();
        Ok(tables
            .reactions
            .get(&(kind, subject_id, user_id))
            .is_some_and(|r| r.polarity == polarity))
    }

    #[instrument(skip(self))]
    async fn record_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<()> {
        self.delay().await;
        self.shared
            .tables
            .lock()
            .creators
            .insert((kind, subject_id, user_id));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<bool> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .creators
            .contains(&(kind, subject_id, user_id)))
    }
}

// ============================================================================
// Sessions
// ============================================================================

#[async_trait]
impl SessionRepository for MemoryStore {
    #[instrument(skip(self, session), fields(session = %session.uuid))]
    async fn insert(&self, session: &Session) -> RepoResult<()> {
        self.delay().await;
        let mut tables = self.shared.tables.lock();
        if tables.sessions.values().any(|s| s.user_id == session.user_id) {
            return Err(DomainError::Conflict(format!(
                "user {} already has a live session",
                session.user_id
            )));
        }
        tables.sessions.insert(session.uuid, session.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: Uuid) -> RepoResult<Option<Session>> {
        self.delay().await;
        Ok(self.shared.tables.lock().sessions.get(&uuid).cloned())
    }

    #[instrument(skip(self, cookie_token))]
    async fn find_by_cookie(&self, cookie_token: &str) -> RepoResult<Option<Session>> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .sessions
            .values()
            .find(|s| s.cookie_token == cookie_token)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn update_last_seen(&self, uuid: Uuid, slot: ActivitySlot) -> RepoResult<()> {
        self.delay().await;
        if self.shared.fail_last_seen_writes.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "last_seen write rejected".to_string(),
            ));
        }
        if let Some(session) = self.shared.tables.lock().sessions.get_mut(&uuid) {
            session.last_seen = slot;
        }
        self.shared.last_seen_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, uuid: Uuid) -> RepoResult<bool> {
        self.delay().await;
        Ok(self.shared.tables.lock().sessions.remove(&uuid).is_some())
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        self.delay().await;
        let mut tables = self.shared.tables.lock();
        let before = tables.sessions.len();
        tables.sessions.retain(|_, s| s.user_id != user_id);
        Ok((before - tables.sessions.len()) as u64)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<u64> {
        self.delay().await;
        let mut tables = self.shared.tables.lock();
        let removed = tables.sessions.len() as u64;
        tables.sessions.clear();
        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn list_active_with_user(&self) -> RepoResult<Vec<(User, ActivitySlot)>> {
        self.delay().await;
        let tables = self.shared.tables.lock();
        let mut rows: Vec<(User, ActivitySlot)> = tables
            .sessions
            .values()
            .filter_map(|s| {
                tables
                    .users
                    .get(&s.user_id)
                    .map(|(user, _)| (user.clone(), s.last_seen))
            })
            .collect();
        rows.sort_by_key(|(user, _)| user.id);
        Ok(rows)
    }
}

// ============================================================================
// Users
// ============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .users
            .get(&id)
            .map(|(user, _)| user.clone()))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, _)| user.clone()))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: UserId) -> RepoResult<bool> {
        self.delay().await;
        Ok(self.shared.tables.lock().users.contains_key(&id))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .users
            .values()
            .any(|(user, _)| user.email == email))
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> RepoResult<User> {
        self.delay().await;
        let mut tables = self.shared.tables.lock();
        if tables.users.values().any(|(user, _)| user.email == email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        Ok(tables.insert_user(name, email, password_hash))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .users
            .get(&id)
            .map(|(_, hash)| hash.clone()))
    }
}

// ============================================================================
// Subjects
// ============================================================================

#[async_trait]
impl SubjectRepository for MemoryStore {
    #[instrument(skip(self))]
    async fn exists(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<bool> {
        self.delay().await;
        Ok(self.shared.tables.lock().subjects.contains_key(&(kind, id)))
    }

    #[instrument(skip(self))]
    async fn owner(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<Option<UserId>> {
        self.delay().await;
        Ok(self.shared.tables.lock().subjects.get(&(kind, id)).copied())
    }

    #[instrument(skip(self, _title))]
    async fn create_thread(&self, owner: UserId, _title: &str) -> RepoResult<SubjectId> {
        self.delay().await;
        Ok(self
            .shared
            .tables
            .lock()
            .insert_subject(SubjectKind::Thread, owner))
    }

    #[instrument(skip(self, _body))]
    async fn create_post(
        &self,
        thread: SubjectId,
        owner: UserId,
        _body: &str,
    ) -> RepoResult<SubjectId> {
        self.delay().await;
        let mut tables = self.shared.tables.lock();
        if !tables.subjects.contains_key(&(SubjectKind::Thread, thread)) {
            return Err(DomainError::SubjectNotFound {
                kind: SubjectKind::Thread,
                id: thread,
            });
        }
        Ok(tables.insert_subject(SubjectKind::Post, owner))
    }
}
