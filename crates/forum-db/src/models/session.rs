//! Session database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for sessions table
#[derive(Debug, Clone, FromRow)]
pub struct SessionModel {
    pub uuid: Uuid,
    pub user_id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub cookie_token: String,
    pub last_seen: i32,
}

/// A session joined with its user (from query)
#[derive(Debug, Clone, FromRow)]
pub struct OnlineUserModel {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub last_seen: i32,
}
