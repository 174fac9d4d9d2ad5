//! Thread and post creation

use axum::{extract::State, Json};
use forum_service::dto::{CreatePostRequest, CreateThreadRequest, SubjectCreatedResponse};
use forum_service::SubjectService;

use crate::extractors::{SessionUser, SubjectIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Start a thread
///
/// POST /api/threads
pub async fn create_thread(
    State(state): State<AppState>,
    auth: SessionUser,
    ValidatedJson(request): ValidatedJson<CreateThreadRequest>,
) -> ApiResult<Created<Json<SubjectCreatedResponse>>> {
    let created = SubjectService::new(state.service_context())
        .create_thread(auth.user.id, request)
        .await?;
    Ok(Created(Json(created)))
}

/// Reply to a thread
///
/// POST /api/threads/{id}/posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: SessionUser,
    SubjectIdPath(thread_id): SubjectIdPath,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<SubjectCreatedResponse>>> {
    let created = SubjectService::new(state.service_context())
        .create_post(auth.user.id, thread_id, request)
        .await?;
    Ok(Created(Json(created)))
}
