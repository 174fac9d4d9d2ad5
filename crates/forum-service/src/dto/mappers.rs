//! Domain to DTO mappers

use forum_core::entities::{User, VoteCounts, VoteOutcome, VoteStatus};
use forum_core::{SubjectId, SubjectKind, UserId};

use super::responses::{
    CountsResponse, CurrentUserResponse, SubjectCreatedResponse, UserResponse,
    UserVoteStatusResponse, VoteResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

// ============================================================================
// Vote Mappers
// ============================================================================

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            action: outcome.action,
            likes: outcome.counts.likes,
            dislikes: outcome.counts.dislikes,
            user_liked: outcome.status.liked,
            user_disliked: outcome.status.disliked,
        }
    }
}

impl From<VoteCounts> for CountsResponse {
    fn from(counts: VoteCounts) -> Self {
        Self {
            likes: counts.likes,
            dislikes: counts.dislikes,
        }
    }
}

impl UserVoteStatusResponse {
    pub fn new(counts: VoteCounts, status: VoteStatus) -> Self {
        Self {
            likes: counts.likes,
            dislikes: counts.dislikes,
            user_liked: status.liked,
            user_disliked: status.disliked,
        }
    }
}

// ============================================================================
// Subject Mappers
// ============================================================================

impl SubjectCreatedResponse {
    pub fn thread(id: SubjectId, owner: UserId) -> Self {
        Self {
            kind: SubjectKind::Thread,
            id: id.into_inner(),
            thread_id: None,
            user_id: owner.into_inner(),
        }
    }

    pub fn post(id: SubjectId, thread: SubjectId, owner: UserId) -> Self {
        Self {
            kind: SubjectKind::Post,
            id: id.into_inner(),
            thread_id: Some(thread.into_inner()),
            user_id: owner.into_inner(),
        }
    }
}
