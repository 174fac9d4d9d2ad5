//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forum_core::entities::VoteAction;
use forum_core::SubjectKind;

// ============================================================================
// User Responses
// ============================================================================

/// Public user info (for online listings)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user's own profile (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Users seen within the window
#[derive(Debug, Clone, Serialize)]
pub struct OnlineUsersResponse {
    pub threshold_minutes: u32,
    pub users: Vec<UserResponse>,
}

// ============================================================================
// Subject Responses
// ============================================================================

/// A freshly created thread or post
#[derive(Debug, Clone, Serialize)]
pub struct SubjectCreatedResponse {
    pub kind: SubjectKind,
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<i64>,
    pub user_id: i64,
}

// ============================================================================
// Vote Responses
// ============================================================================

/// Result of a like/dislike request
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse {
    pub action: VoteAction,
    pub likes: u64,
    pub dislikes: u64,
    pub user_liked: bool,
    pub user_disliked: bool,
}

/// Like/dislike totals
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CountsResponse {
    pub likes: u64,
    pub dislikes: u64,
}

/// Totals plus the caller's own flags
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UserVoteStatusResponse {
    pub likes: u64,
    pub dislikes: u64,
    pub user_liked: bool,
    pub user_disliked: bool,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
