//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::entities::Reaction;
use forum_core::error::DomainError;
use forum_core::traits::{ReactionRepository, RepoResult};
use forum_core::value_objects::{Polarity, SubjectId, SubjectKind, UserId};

use crate::mappers::ReactionInsert;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    /// Create a new PgReactionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// One statement: the old polarity is never observable as deleted on its own.
const REPLACE_REACTION: &str = r"
    INSERT INTO reactions (subject_kind, subject_id, user_id, polarity, created_at)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (subject_kind, subject_id, user_id)
    DO UPDATE SET polarity = EXCLUDED.polarity, created_at = EXCLUDED.created_at
";

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self))]
    async fn insert(&self, reaction: &Reaction) -> RepoResult<()> {
        let row = ReactionInsert::new(reaction);

        // The primary key on (subject_kind, subject_id, user_id) rejects a
        // second reaction from another process racing this one.
        sqlx::query(
            r"
            INSERT INTO reactions (subject_kind, subject_id, user_id, polarity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(row.subject_kind)
        .bind(row.subject_id)
        .bind(row.user_id)
        .bind(row.polarity)
        .bind(reaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::Conflict(format!(
                    "user {} already reacted to {} {}",
                    reaction.user_id, reaction.subject_kind, reaction.subject_id
                ))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn replace(&self, reaction: &Reaction) -> RepoResult<()> {
        let row = ReactionInsert::new(reaction);

        sqlx::query(REPLACE_REACTION)
            .bind(row.subject_kind)
            .bind(row.subject_id)
            .bind(row.user_id)
            .bind(row.polarity)
            .bind(reaction.created_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

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
        let result = sqlx::query(
            r"
            DELETE FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
              AND ($4::TEXT IS NULL OR polarity = $4)
            ",
        )
        .bind(kind.as_str())
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .bind(polarity.map(Polarity::as_str))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn count(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        polarity: Polarity,
    ) -> RepoResult<u64> {
        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM reactions
            WHERE subject_kind = $1 AND subject_id = $2 AND polarity = $3
            ",
        )
        .bind(kind.as_str())
        .bind(subject_id.into_inner())
        .bind(polarity.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count.max(0) as u64)
    }

    #[instrument(skip(self))]
    async fn exists(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Polarity,
    ) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM reactions
                WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3 AND polarity = $4
            )
            ",
        )
        .bind(kind.as_str())
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .bind(polarity.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn record_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO subject_creators (subject_kind, subject_id, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (subject_kind, subject_id, user_id) DO NOTHING
            ",
        )
        .bind(kind.as_str())
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn is_creator(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
    ) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM subject_creators
                WHERE subject_kind = $1 AND subject_id = $2 AND user_id = $3
            )
            ",
        )
        .bind(kind.as_str())
        .bind(subject_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
