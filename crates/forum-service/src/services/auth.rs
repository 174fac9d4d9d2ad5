//! Authentication service
//!
//! Registration, password login and logout on top of the session tracker,
//! plus resolving a request's session cookie to a user.

use forum_common::auth::{hash_password, verify_password};
use forum_common::AppError;
use forum_core::entities::{Session, User};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::dto::{CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::session::SessionTracker;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(name = %request.name, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let users = self.ctx.user_repo();

        if self
            .ctx
            .store("email exists", users.email_exists(&request.email))
            .await?
        {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = hash_password(&request.password)?;

        let user = self
            .ctx
            .store(
                "create user",
                users.create(&request.name, &request.email, &password_hash),
            )
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        Ok(CurrentUserResponse::from(&user))
    }

    /// Login with email and password, replacing any existing session
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<(Session, CurrentUserResponse)> {
        request.validate()?;

        let users = self.ctx.user_repo();

        let user = self
            .ctx
            .store("find user by email", users.find_by_email(&request.email))
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .store("get password hash", users.get_password_hash(user.id))
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        let session = SessionTracker::new(self.ctx).create_session(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok((session, CurrentUserResponse::from(&user)))
    }

    /// End a session
    #[instrument(skip(self))]
    pub async fn logout(&self, session_uuid: Uuid) -> ServiceResult<()> {
        SessionTracker::new(self.ctx)
            .delete_session(session_uuid)
            .await?;
        Ok(())
    }

    /// Resolve a session cookie to its session and user, refreshing activity.
    ///
    /// Any miss (malformed token, revoked session, deleted user) is `None`.
    #[instrument(skip(self, cookie_token))]
    pub async fn authenticate(&self, cookie_token: &str) -> ServiceResult<Option<(Session, User)>> {
        let tracker = SessionTracker::new(self.ctx);

        let Some(found) = tracker.resolve_by_cookie(cookie_token).await? else {
            return Ok(None);
        };

        let (session, valid) = tracker.validate(found.uuid).await?;
        let Some(session) = session.filter(|_| valid) else {
            return Ok(None);
        };

        let user = self
            .ctx
            .store("find user", self.ctx.user_repo().find_by_id(session.user_id))
            .await?;

        Ok(user.map(|user| (session, user)))
    }
}
