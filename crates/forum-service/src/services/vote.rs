//! Vote engine
//!
//! Like/dislike toggling for posts and threads. A user holds at most one
//! reaction per subject: voting the same polarity again removes it, voting
//! the opposite polarity switches it.

use tracing::{error, info, instrument};

use forum_core::entities::{Reaction, VoteAction, VoteCounts, VoteOutcome, VoteStatus};
use forum_core::{DomainError, Polarity, SubjectId, SubjectKind, UserId};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Vote engine
pub struct VoteEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteEngine<'a> {
    /// Create a new VoteEngine
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Whether the user currently holds `polarity` on the subject
    #[instrument(skip(self))]
    pub async fn has_reaction(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
        polarity: Polarity,
    ) -> ServiceResult<bool> {
        let exists = self
            .ctx
            .store(
                "reaction exists",
                self.ctx
                    .reaction_repo()
                    .exists(kind, subject_id, user_id, polarity),
            )
            .await?;
        Ok(exists)
    }

    /// Apply a like or dislike.
    ///
    /// Holds the per-(subject, user) lock from the first read until the
    /// returned counts have been read.
    #[instrument(skip(self))]
    pub async fn apply_vote(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
        polarity: Polarity,
    ) -> ServiceResult<VoteOutcome> {
        self.ensure_subject(kind, subject_id).await?;
        self.ensure_user(user_id).await?;

        let _guard = self.ctx.vote_locks().lock((kind, subject_id, user_id)).await;

        let before = self.read_status(user_id, kind, subject_id).await?;
        let repo = self.ctx.reaction_repo();

        let action = match before.polarity() {
            Some(held) if held == polarity => {
                self.ctx
                    .store(
                        "delete reaction",
                        repo.delete(kind, subject_id, user_id, Some(polarity)),
                    )
                    .await?;
                VoteAction::Removed
            }
            Some(_) => {
                // A failed replace leaves the old reaction in place
                let reaction = Reaction::new(kind, subject_id, user_id, polarity);
                self.ctx
                    .store("replace reaction", repo.replace(&reaction))
                    .await?;
                VoteAction::Switched
            }
            None => {
                let reaction = Reaction::new(kind, subject_id, user_id, polarity);
                self.ctx
                    .store("insert reaction", repo.insert(&reaction))
                    .await?;
                VoteAction::Added
            }
        };

        let status = self.read_status(user_id, kind, subject_id).await?;
        let counts = self.get_counts(kind, subject_id).await?;

        info!(
            user_id = %user_id,
            subject = %kind,
            subject_id = %subject_id,
            polarity = %polarity,
            action = ?action,
            likes = counts.likes,
            dislikes = counts.dislikes,
            "Vote applied"
        );

        Ok(VoteOutcome {
            action,
            counts,
            status,
        })
    }

    /// Like and dislike totals for a subject
    #[instrument(skip(self))]
    pub async fn get_counts(
        &self,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<VoteCounts> {
        let repo = self.ctx.reaction_repo();
        let likes = self
            .ctx
            .store("count likes", repo.count(kind, subject_id, Polarity::Like))
            .await?;
        let dislikes = self
            .ctx
            .store(
                "count dislikes",
                repo.count(kind, subject_id, Polarity::Dislike),
            )
            .await?;
        Ok(VoteCounts::new(likes, dislikes))
    }

    /// The user's liked/disliked flags on a subject
    #[instrument(skip(self))]
    pub async fn get_user_vote_status(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<VoteStatus> {
        self.read_status(user_id, kind, subject_id).await
    }

    /// Mark `user_id` as the author of a subject
    #[instrument(skip(self))]
    pub async fn record_creator(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<()> {
        self.ctx
            .store(
                "record creator",
                self.ctx
                    .reaction_repo()
                    .record_creator(kind, subject_id, user_id),
            )
            .await?;
        Ok(())
    }

    /// Whether a creator marker exists for the user on the subject
    #[instrument(skip(self))]
    pub async fn is_creator(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<bool> {
        let marked = self
            .ctx
            .store(
                "is creator",
                self.ctx
                    .reaction_repo()
                    .is_creator(kind, subject_id, user_id),
            )
            .await?;
        Ok(marked)
    }

    /// Whether the user authored the subject, by owner column or creator marker
    #[instrument(skip(self))]
    pub async fn is_own_subject(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<bool> {
        let owner = self
            .ctx
            .store(
                "subject owner",
                self.ctx.subject_repo().owner(kind, subject_id),
            )
            .await?;
        if owner == Some(user_id) {
            return Ok(true);
        }
        self.is_creator(user_id, kind, subject_id).await
    }

    async fn read_status(
        &self,
        user_id: UserId,
        kind: SubjectKind,
        subject_id: SubjectId,
    ) -> ServiceResult<VoteStatus> {
        let liked = self
            .has_reaction(user_id, kind, subject_id, Polarity::Like)
            .await?;
        let disliked = self
            .has_reaction(user_id, kind, subject_id, Polarity::Dislike)
            .await?;
        let status = VoteStatus::new(liked, disliked);

        if status.is_inconsistent() {
            error!(
                user_id = %user_id,
                subject = %kind,
                subject_id = %subject_id,
                "User holds both a like and a dislike"
            );
            return Err(DomainError::Conflict(format!(
                "user {user_id} both likes and dislikes {kind} {subject_id}"
            ))
            .into());
        }

        Ok(status)
    }

    async fn ensure_subject(&self, kind: SubjectKind, subject_id: SubjectId) -> ServiceResult<()> {
        let exists = self
            .ctx
            .store(
                "subject exists",
                self.ctx.subject_repo().exists(kind, subject_id),
            )
            .await?;
        if exists {
            Ok(())
        } else {
            Err(DomainError::SubjectNotFound {
                kind,
                id: subject_id,
            }
            .into())
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> ServiceResult<()> {
        let exists = self
            .ctx
            .store("user exists", self.ctx.user_repo().exists(user_id))
            .await?;
        if exists {
            Ok(())
        } else {
            Err(DomainError::InvalidUser(user_id).into())
        }
    }
}
