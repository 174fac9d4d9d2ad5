//! Subject service
//!
//! Creates threads and posts. The author is recorded twice: as the row's
//! owner and as a creator marker next to the reactions.

use tracing::{info, instrument, warn};
use validator::Validate;

use forum_core::{DomainError, SubjectId, SubjectKind, UserId};

use crate::dto::{CreatePostRequest, CreateThreadRequest, SubjectCreatedResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::vote::VoteEngine;

/// Subject service
pub struct SubjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubjectService<'a> {
    /// Create a new SubjectService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Start a thread authored by `owner`
    #[instrument(skip(self, request))]
    pub async fn create_thread(
        &self,
        owner: UserId,
        request: CreateThreadRequest,
    ) -> ServiceResult<SubjectCreatedResponse> {
        request.validate()?;
        self.ensure_user(owner).await?;

        let id = self
            .ctx
            .store(
                "create thread",
                self.ctx.subject_repo().create_thread(owner, &request.title),
            )
            .await?;
        self.mark_creator(owner, SubjectKind::Thread, id).await;

        info!(user_id = %owner, thread_id = %id, "Thread created");
        Ok(SubjectCreatedResponse::thread(id, owner))
    }

    /// Reply to a thread
    #[instrument(skip(self, request))]
    pub async fn create_post(
        &self,
        owner: UserId,
        thread: SubjectId,
        request: CreatePostRequest,
    ) -> ServiceResult<SubjectCreatedResponse> {
        request.validate()?;
        self.ensure_user(owner).await?;

        let id = self
            .ctx
            .store(
                "create post",
                self.ctx
                    .subject_repo()
                    .create_post(thread, owner, &request.body),
            )
            .await?;
        self.mark_creator(owner, SubjectKind::Post, id).await;

        info!(user_id = %owner, thread_id = %thread, post_id = %id, "Post created");
        Ok(SubjectCreatedResponse::post(id, thread, owner))
    }

    // The row already exists and its owner column still identifies the
    // author, so a missing marker is logged rather than failing the request.
    async fn mark_creator(&self, owner: UserId, kind: SubjectKind, id: SubjectId) {
        if let Err(e) = VoteEngine::new(self.ctx)
            .record_creator(owner, kind, id)
            .await
        {
            warn!(user_id = %owner, subject = %kind, subject_id = %id, error = %e, "Failed to record creator");
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
