//! Authentication handlers
//!
//! Registration, login (which issues the session cookie), logout and the
//! caller's own profile.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use forum_service::dto::{CurrentUserResponse, LoginRequest, RegisterRequest};
use forum_service::AuthService;

use crate::extractors::{SessionUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<CurrentUserResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<CurrentUserResponse>)> {
    let service = AuthService::new(state.service_context());
    let (session, user) = service.login(request).await?;

    let cookie = Cookie::build((state.cookie_name().to_owned(), session.cookie_token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config().app.env.is_production());

    Ok((jar.add(cookie), Json(user)))
}

/// Logout: revoke the session and clear the cookie
///
/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: SessionUser,
    jar: CookieJar,
) -> ApiResult<(CookieJar, NoContent)> {
    let service = AuthService::new(state.service_context());
    service.logout(auth.session.uuid).await?;

    let removal = Cookie::build(state.cookie_name().to_owned()).path("/");
    Ok((jar.remove(removal), NoContent))
}

/// The caller's own profile
///
/// GET /api/auth/me
pub async fn me(auth: SessionUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse::from(&auth.user))
}
