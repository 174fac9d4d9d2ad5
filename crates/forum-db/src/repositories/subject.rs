//! PostgreSQL implementation of SubjectRepository
//!
//! Threads and posts live in their own tables; votes only need to know that
//! a subject exists and who wrote it.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, SubjectRepository};
use forum_core::value_objects::{SubjectId, SubjectKind, UserId};

use super::error::map_db_error;

/// PostgreSQL implementation of SubjectRepository
#[derive(Clone)]
pub struct PgSubjectRepository {
    pool: PgPool,
}

impl PgSubjectRepository {
    /// Create a new PgSubjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const fn owner_query(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Thread => "SELECT user_id FROM threads WHERE id = $1",
        SubjectKind::Post => "SELECT user_id FROM posts WHERE id = $1",
    }
}

#[async_trait]
impl SubjectRepository for PgSubjectRepository {
    #[instrument(skip(self))]
    async fn exists(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<bool> {
        Ok(self.owner(kind, id).await?.is_some())
    }

    #[instrument(skip(self))]
    async fn owner(&self, kind: SubjectKind, id: SubjectId) -> RepoResult<Option<UserId>> {
        let result = sqlx::query_scalar::<_, i64>(owner_query(kind))
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(UserId::new))
    }

    #[instrument(skip(self, title))]
    async fn create_thread(&self, owner: UserId, title: &str) -> RepoResult<SubjectId> {
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO threads (user_id, title)
            VALUES ($1, $2)
            RETURNING id
            ",
        )
        .bind(owner.into_inner())
        .bind(title)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(SubjectId::new(id))
    }

    #[instrument(skip(self, body))]
    async fn create_post(
        &self,
        thread: SubjectId,
        owner: UserId,
        body: &str,
    ) -> RepoResult<SubjectId> {
        // No row comes back when the thread is missing
        let id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO posts (thread_id, user_id, body)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM threads WHERE id = $1)
            RETURNING id
            ",
        )
        .bind(thread.into_inner())
        .bind(owner.into_inner())
        .bind(body)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        id.map(SubjectId::new).ok_or(DomainError::SubjectNotFound {
            kind: SubjectKind::Thread,
            id: thread,
        })
    }
}
