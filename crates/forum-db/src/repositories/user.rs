//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use forum_core::entities::User;
use forum_core::error::DomainError;
use forum_core::traits::{RepoResult, UserRepository};
use forum_core::value_objects::UserId;

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

// Never selects password_hash; that column is read only by get_password_hash
const USER_BY_ID: &str = "SELECT id, uuid, name, email, created_at FROM users WHERE id = $1";
const USER_BY_EMAIL: &str = "SELECT id, uuid, name, email, created_at FROM users WHERE email = $1";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(USER_BY_ID)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        sqlx::query_as::<_, UserModel>(USER_BY_EMAIL)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: UserId) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, name: &str, email: &str, password_hash: &str) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (uuid, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, uuid, name, email, created_at
            ",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}
