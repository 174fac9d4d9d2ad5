//! Route definitions
//!
//! Health at the root, everything else under /api.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use forum_core::SubjectKind;

use crate::handlers::{auth, health, subjects, users, votes};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(subject_routes())
        .nest("/posts", vote_routes(SubjectKind::Post))
        .nest("/threads", vote_routes(SubjectKind::Thread))
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new().route("/users/online", get(users::online_users))
}

/// Thread and post creation
fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/threads", post(subjects::create_thread))
        .route("/threads/:id/posts", post(subjects::create_post))
}

/// Vote routes for one subject kind
fn vote_routes(kind: SubjectKind) -> Router<AppState> {
    Router::new()
        .route("/:id/like", post(votes::like))
        .route("/:id/dislike", post(votes::dislike))
        .route("/:id/counts", get(votes::counts))
        .route("/:id/status", get(votes::status))
        .layer(Extension(kind))
}
