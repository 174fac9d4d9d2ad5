//! PostgreSQL implementation of SessionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::{Session, User};
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, SessionRepository};
use forum_core::value_objects::{ActivitySlot, UserId};

use crate::mappers::SessionInsert;
use crate::models::{OnlineUserModel, SessionModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of SessionRepository
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    /// Create a new PgSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    #[instrument(skip(self, session), fields(session = %session.uuid, user = %session.user_id))]
    async fn insert(&self, session: &Session) -> RepoResult<()> {
        let row = SessionInsert::new(session);

        sqlx::query(
            r"
            INSERT INTO sessions (uuid, user_id, email, created_at, cookie_token, last_seen)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(row.uuid)
        .bind(row.user_id)
        .bind(row.email)
        .bind(session.created_at)
        .bind(row.cookie_token)
        .bind(row.last_seen)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::Conflict(format!("user {} already has a live session", session.user_id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_uuid(&self, uuid: Uuid) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT uuid, user_id, email, created_at, cookie_token, last_seen
            FROM sessions
            WHERE uuid = $1
            ",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Session::try_from).transpose()
    }

    #[instrument(skip(self, cookie_token))]
    async fn find_by_cookie(&self, cookie_token: &str) -> RepoResult<Option<Session>> {
        let result = sqlx::query_as::<_, SessionModel>(
            r"
            SELECT uuid, user_id, email, created_at, cookie_token, last_seen
            FROM sessions
            WHERE cookie_token = $1
            ",
        )
        .bind(cookie_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Session::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn update_last_seen(&self, uuid: Uuid, slot: ActivitySlot) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE sessions SET last_seen = $2 WHERE uuid = $1
            ",
        )
        .bind(uuid)
        .bind(i32::from(slot))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, uuid: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions WHERE uuid = $1
            ",
        )
        .bind(uuid)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_for_user(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions WHERE user_id = $1
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            DELETE FROM sessions
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn list_active_with_user(&self) -> RepoResult<Vec<(User, ActivitySlot)>> {
        let results = sqlx::query_as::<_, OnlineUserModel>(
            r"
            SELECT u.id, u.uuid, u.name, u.email, u.created_at, s.last_seen
            FROM sessions s
            INNER JOIN users u ON u.id = s.user_id
            ORDER BY u.id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(TryFrom::try_from).collect()
    }
}
