//! User presence handlers

use axum::{extract::State, Json};
use forum_service::dto::{OnlineUsersQuery, OnlineUsersResponse, UserResponse};
use forum_service::SessionTracker;

use crate::extractors::{OptionalSessionUser, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Users active within the last `minutes` (default from configuration)
///
/// A logged-in viewer is resolved first, so their own activity is refreshed
/// before the listing is read.
///
/// GET /api/users/online?minutes=N
pub async fn online_users(
    State(state): State<AppState>,
    _viewer: OptionalSessionUser,
    ValidatedQuery(query): ValidatedQuery<OnlineUsersQuery>,
) -> ApiResult<Json<OnlineUsersResponse>> {
    let threshold = query
        .minutes
        .unwrap_or_else(|| state.online_threshold_minutes());

    let users = SessionTracker::new(state.service_context())
        .list_online_users(threshold)
        .await?;

    Ok(Json(OnlineUsersResponse {
        threshold_minutes: threshold,
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}
