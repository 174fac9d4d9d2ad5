//! Vote handlers
//!
//! Shared by posts and threads; the subject kind arrives as a router
//! extension set where the routes are mounted.

use axum::{extract::State, Extension, Json};
use forum_core::{Polarity, SubjectKind};
use forum_service::dto::{CountsResponse, UserVoteStatusResponse, VoteResponse};
use forum_service::{ServiceError, VoteEngine};

use crate::extractors::{SessionUser, SubjectIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like a subject, or take the like back
///
/// POST /api/{posts|threads}/{id}/like
pub async fn like(
    state: State<AppState>,
    kind: Extension<SubjectKind>,
    auth: SessionUser,
    path: SubjectIdPath,
) -> ApiResult<Json<VoteResponse>> {
    vote(state, kind, auth, path, Polarity::Like).await
}

/// Dislike a subject, or take the dislike back
///
/// POST /api/{posts|threads}/{id}/dislike
pub async fn dislike(
    state: State<AppState>,
    kind: Extension<SubjectKind>,
    auth: SessionUser,
    path: SubjectIdPath,
) -> ApiResult<Json<VoteResponse>> {
    vote(state, kind, auth, path, Polarity::Dislike).await
}

async fn vote(
    State(state): State<AppState>,
    Extension(kind): Extension<SubjectKind>,
    auth: SessionUser,
    SubjectIdPath(subject_id): SubjectIdPath,
    polarity: Polarity,
) -> ApiResult<Json<VoteResponse>> {
    let engine = VoteEngine::new(state.service_context());
    let user_id = auth.user.id;

    if !state.allow_self_vote() && engine.is_own_subject(user_id, kind, subject_id).await? {
        tracing::info!(
            user_id = %user_id,
            subject = %kind,
            subject_id = %subject_id,
            "Rejected vote on own subject"
        );
        return Err(ServiceError::forbidden(format!("cannot vote on your own {kind}")).into());
    }

    let outcome = engine.apply_vote(user_id, kind, subject_id, polarity).await?;
    Ok(Json(VoteResponse::from(outcome)))
}

/// Like and dislike totals
///
/// GET /api/{posts|threads}/{id}/counts
pub async fn counts(
    State(state): State<AppState>,
    Extension(kind): Extension<SubjectKind>,
    SubjectIdPath(subject_id): SubjectIdPath,
) -> ApiResult<Json<CountsResponse>> {
    let counts = VoteEngine::new(state.service_context())
        .get_counts(kind, subject_id)
        .await?;
    Ok(Json(CountsResponse::from(counts)))
}

/// Totals plus the caller's own flags
///
/// GET /api/{posts|threads}/{id}/status
pub async fn status(
    State(state): State<AppState>,
    Extension(kind): Extension<SubjectKind>,
    auth: SessionUser,
    SubjectIdPath(subject_id): SubjectIdPath,
) -> ApiResult<Json<UserVoteStatusResponse>> {
    let engine = VoteEngine::new(state.service_context());
    let counts = engine.get_counts(kind, subject_id).await?;
    let status = engine
        .get_user_vote_status(auth.user.id, kind, subject_id)
        .await?;
    Ok(Json(UserVoteStatusResponse::new(counts, status)))
}
