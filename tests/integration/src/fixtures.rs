//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("member{suffix}"),
            email: format!("member{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// The caller's own profile
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Public user entry
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
}

/// Online listing
#[derive(Debug, Deserialize)]
pub struct OnlineUsersResponse {
    pub threshold_minutes: u32,
    pub users: Vec<UserResponse>,
}

/// A created thread or post
#[derive(Debug, Deserialize)]
pub struct SubjectCreated {
    pub kind: String,
    pub id: i64,
    pub thread_id: Option<i64>,
    pub user_id: i64,
}

/// Result of a like/dislike
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub action: String,
    pub likes: u64,
    pub dislikes: u64,
    pub user_liked: bool,
    pub user_disliked: bool,
}

/// Totals
#[derive(Debug, Deserialize)]
pub struct CountsResponse {
    pub likes: u64,
    pub dislikes: u64,
}

/// Totals plus the caller's flags
#[derive(Debug, Deserialize)]
pub struct VoteStatusResponse {
    pub likes: u64,
    pub dislikes: u64,
    pub user_liked: bool,
    pub user_disliked: bool,
}

/// Error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
