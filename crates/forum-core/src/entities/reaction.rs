//! Reaction entity - a like or dislike on a post or thread

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{Polarity, SubjectId, SubjectKind, UserId};

/// Reaction entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub subject_kind: SubjectKind,
    pub subject_id: SubjectId,
    pub user_id: UserId,
    pub polarity: Polarity,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    /// Create a new Reaction
    pub fn new(
        subject_kind: SubjectKind,
        subject_id: SubjectId,
        user_id: UserId,
        polarity: Polarity,
    ) -> Self {
        Self {
            subject_kind,
            subject_id,
            user_id,
            polarity,
            created_at: Utc::now(),
        }
    }
}

/// Aggregated like/dislike totals for one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteCounts {
    pub likes: u64,
    pub dislikes: u64,
}

impl VoteCounts {
    pub fn new(likes: u64, dislikes: u64) -> Self {
        Self { likes, dislikes }
    }
}

/// One user's reaction state on one subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VoteStatus {
    pub liked: bool,
    pub disliked: bool,
}

impl VoteStatus {
    pub fn new(liked: bool, disliked: bool) -> Self {
        Self { liked, disliked }
    }

    /// The polarity currently held, if any
    pub fn polarity(&self) -> Option<Polarity> {
        match (self.liked, self.disliked) {
            (true, false) => Some(Polarity::Like),
            (false, true) => Some(Polarity::Dislike),
            _ => None,
        }
    }

    /// Both flags set means the mutual-exclusion invariant is broken
    #[inline]
    pub fn is_inconsistent(&self) -> bool {
        self.liked && self.disliked
    }
}

/// Which branch of the toggle a vote took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    /// No prior reaction; the requested one was inserted
    Added,
    /// Same polarity was already held and has been removed
    Removed,
    /// Opposite polarity was replaced by the requested one
    Switched,
}

/// Result of applying a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    pub action: VoteAction,
    pub counts: VoteCounts,
    pub status: VoteStatus,
}
