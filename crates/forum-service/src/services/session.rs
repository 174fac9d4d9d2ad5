//! Session activity tracker
//!
//! Issues and revokes login sessions, keeps a coarse "last seen" slot fresh
//! without writing on every request, and answers who is online.

use std::collections::HashSet;

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use forum_core::entities::{Session, User};
use forum_core::{DomainError, SessionToken, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Session activity tracker
pub struct SessionTracker<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SessionTracker<'a> {
    /// Create a new SessionTracker
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a fresh session for a user, revoking any it already had
    #[instrument(skip(self))]
    pub async fn create_session(&self, user_id: UserId) -> ServiceResult<Session> {
        let user = self
            .ctx
            .store("find user", self.ctx.user_repo().find_by_id(user_id))
            .await?
            .ok_or(DomainError::InvalidUser(user_id))?;

        let _guard = self.ctx.login_locks().lock(user_id).await;
        let repo = self.ctx.session_repo();

        let revoked = self
            .ctx
            .store("delete user sessions", repo.delete_for_user(user_id))
            .await?;

        let session = Session::new(user_id, user.email, self.ctx.clock().now_slot());
        self.ctx
            .store("insert session", repo.insert(&session))
            .await?;

        info!(
            user_id = %user_id,
            session = %session.uuid,
            revoked,
            "Session created"
        );
        Ok(session)
    }

    /// Look up a session and bump its last-seen slot when it is stale.
    ///
    /// Returns `(None, false)` for an unknown uuid. A failed bump is logged and
    /// otherwise ignored; the session is still valid.
    #[instrument(skip(self))]
    pub async fn validate(&self, uuid: Uuid) -> ServiceResult<(Option<Session>, bool)> {
        let _guard = self.ctx.session_locks().lock(uuid).await;

        let Some(mut session) = self
            .ctx
            .store("find session", self.ctx.session_repo().find_by_uuid(uuid))
            .await?
        else {
            debug!(session = %uuid, "Session not found");
            return Ok((None, false));
        };

        let now = self.ctx.clock().now_slot();
        let idle = now.minutes_since(session.last_seen);

        if idle >= self.ctx.settings().refresh_minutes {
            let written = self
                .ctx
                .store(
                    "update last seen",
                    self.ctx.session_repo().update_last_seen(uuid, now),
                )
                .await;
            match written {
                Ok(()) => {
                    debug!(session = %uuid, from = %session.last_seen, to = %now, "Last seen refreshed");
                    session.last_seen = now;
                }
                Err(e) => {
                    warn!(session = %uuid, error = %e, "Failed to refresh last seen");
                }
            }
        }

        Ok((Some(session), true))
    }

    /// Find the session a cookie token refers to; malformed tokens are a miss
    #[instrument(skip(self, cookie_token))]
    pub async fn resolve_by_cookie(&self, cookie_token: &str) -> ServiceResult<Option<Session>> {
        let token = match cookie_token.parse::<SessionToken>() {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Rejected malformed session cookie");
                return Ok(None);
            }
        };

        let session = self
            .ctx
            .store(
                "find session by cookie",
                self.ctx.session_repo().find_by_cookie(cookie_token),
            )
            .await?;

        Ok(session.filter(|s| s.user_id == token.user_id && s.uuid == token.session_uuid))
    }

    /// Revoke one session; returns whether it existed
    #[instrument(skip(self))]
    pub async fn delete_session(&self, uuid: Uuid) -> ServiceResult<bool> {
        let removed = self
            .ctx
            .store("delete session", self.ctx.session_repo().delete(uuid))
            .await?;
        if removed {
            info!(session = %uuid, "Session deleted");
        }
        Ok(removed)
    }

    /// Revoke every session
    #[instrument(skip(self))]
    pub async fn delete_all_sessions(&self) -> ServiceResult<u64> {
        let removed = self
            .ctx
            .store("delete all sessions", self.ctx.session_repo().delete_all())
            .await?;
        info!(removed, "All sessions deleted");
        Ok(removed)
    }

    /// Users seen within `threshold_minutes` of now, oldest id first
    #[instrument(skip(self))]
    pub async fn list_online_users(&self, threshold_minutes: u32) -> ServiceResult<Vec<User>> {
        let rows = self
            .ctx
            .store(
                "list sessions",
                self.ctx.session_repo().list_active_with_user(),
            )
            .await?;

        let now = self.ctx.clock().now_slot();
        let mut seen = HashSet::new();
        let users = rows
            .into_iter()
            .filter(|(_, last_seen)| now.minutes_since(*last_seen) <= threshold_minutes)
            .filter_map(|(user, _)| seen.insert(user.id).then_some(user))
            .collect();

        Ok(users)
    }
}
