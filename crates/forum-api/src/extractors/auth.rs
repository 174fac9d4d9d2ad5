//! Session cookie extractor
//!
//! Resolves the session cookie to a live session and its user. Resolution
//! goes through `AuthService::authenticate`, so every authenticated request
//! also keeps the session's last-seen slot fresh.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use forum_core::entities::{Session, User};
use forum_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub session: Session,
    pub user: User,
}

async fn resolve(parts: &Parts, state: &AppState) -> Result<Option<SessionUser>, ApiError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(state.cookie_name()) else {
        return Ok(None);
    };

    let found = AuthService::new(state.service_context())
        .authenticate(cookie.value())
        .await?;

    match found {
        Some((session, user)) => Ok(Some(SessionUser { session, user })),
        None => {
            tracing::debug!("Session cookie did not resolve");
            Err(ApiError::InvalidSession)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        resolve(parts, &app_state)
            .await?
            .ok_or(ApiError::MissingSession)
    }
}

/// Optional authenticated caller
///
/// `None` when no session cookie is sent. A cookie that no longer resolves
/// is also `None`: a stale cookie should not break public pages.
#[derive(Debug, Clone)]
pub struct OptionalSessionUser(pub Option<SessionUser>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalSessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        match resolve(parts, &app_state).await {
            Ok(user) => Ok(OptionalSessionUser(user)),
            Err(ApiError::InvalidSession) => Ok(OptionalSessionUser(None)),
            Err(e) => Err(e),
        }
    }
}
