//! API Integration Tests
//!
//! Run with: cargo test -p integration-tests --test api_tests
//!
//! Everything except the PostgreSQL smoke test runs against the in-memory
//! store; that one needs DATABASE_URL.

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, session_cookie, slot,
    start_postgres_server, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let user: CurrentUserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(user.name, request.name);
    assert_eq!(user.email, request.email);

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with(&format!("session={}&", user.id)));
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/auth/me", &cookie).await.unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(body.error.code, "CONFLICT");
}

#[tokio::test]
async fn test_register_validation() {
    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest {
        name: "x".to_string(),
        email: "not-an-email".to_string(),
        password: "short".to_string(),
    };

    let response = server.post("/api/auth/register", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let user = server.signup().await.unwrap();

    let request = LoginRequest {
        email: user.register.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/api/auth/login", &request).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_second_login_revokes_first_session() {
    let server = TestServer::start().await.unwrap();
    let user = server.signup().await.unwrap();
    let first = user.cookie.clone();

    let second = server.login(&user.register).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(server.store.session_count(user.id), 1);

    let response = server.get_auth("/api/auth/me", &first).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
    let response = server.get_auth("/api/auth/me", &second).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let server = TestServer::start().await.unwrap();
    let user = server.signup().await.unwrap();

    let response = server.post_auth("/api/auth/logout", &user.cookie).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert_eq!(server.store.session_count(user.id), 0);

    let response = server.get_auth("/api/auth/me", &user.cookie).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_SESSION");
}

#[tokio::test]
async fn test_tampered_cookie_user_id() {
    let server = TestServer::start().await.unwrap();
    let user = server.signup().await.unwrap();
    let other = server.signup().await.unwrap();

    // Same session uuid, someone else's id
    let (_, uuid) = user.cookie.split_once('&').unwrap();
    let forged = format!("session={}&{uuid}", other.id);

    let response = server.get_auth("/api/auth/me", &forged).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Vote Tests
// ============================================================================

#[tokio::test]
async fn test_vote_toggle_and_switch_on_thread() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();
    let a = server.signup().await.unwrap();
    let b = server.signup().await.unwrap();
    let thread = server.thread_by(&author).await.unwrap();

    let like = format!("/api/threads/{thread}/like");
    let dislike = format!("/api/threads/{thread}/dislike");

    let response = server.post_auth(&like, &a.cookie).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.action, "added");
    assert_eq!((vote.likes, vote.dislikes), (1, 0));
    assert!(vote.user_liked && !vote.user_disliked);

    let response = server.post_auth(&like, &b.cookie).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((vote.likes, vote.dislikes), (2, 0));

    // A switches to dislike
    let response = server.post_auth(&dislike, &a.cookie).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.action, "switched");
    assert_eq!((vote.likes, vote.dislikes), (1, 1));
    assert!(!vote.user_liked && vote.user_disliked);

    // B takes the like back
    let response = server.post_auth(&like, &b.cookie).await.unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.action, "removed");
    assert_eq!((vote.likes, vote.dislikes), (0, 1));
    assert!(!vote.user_liked && !vote.user_disliked);

    let response = server.get(&format!("/api/threads/{thread}/counts")).await.unwrap();
    let counts: CountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (0, 1));

    let response = server
        .get_auth(&format!("/api/threads/{thread}/status"), &a.cookie)
        .await
        .unwrap();
    let status: VoteStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((status.likes, status.dislikes), (0, 1));
    assert!(!status.user_liked && status.user_disliked);
}

#[tokio::test]
async fn test_posts_and_threads_are_separate_subjects() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();
    let voter = server.signup().await.unwrap();
    let post = server.post_by(&author).await.unwrap();
    let thread = server.thread_by(&author).await.unwrap();

    let response = server
        .post_auth(&format!("/api/posts/{post}/like"), &voter.cookie)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/threads/{thread}/counts")).await.unwrap();
    let counts: CountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((counts.likes, counts.dislikes), (0, 0));

    let response = server.get(&format!("/api/posts/{post}/counts")).await.unwrap();
    let counts: CountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts.likes, 1);
}

#[tokio::test]
async fn test_self_vote_forbidden() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();
    let post = server.post_by(&author).await.unwrap();

    let response = server
        .post_auth(&format!("/api/posts/{post}/like"), &author.cookie)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "FORBIDDEN");
    assert!(server.store.reactions_on(forum_core::SubjectKind::Post, post).is_empty());
}

#[tokio::test]
async fn test_self_vote_allowed_by_config() {
    let server = TestServer::start_with(|config| config.votes.allow_self_vote = true)
        .await
        .unwrap();
    let author = server.signup().await.unwrap();
    let post = server.post_by(&author).await.unwrap();

    let response = server
        .post_auth(&format!("/api/posts/{post}/dislike"), &author.cookie)
        .await
        .unwrap();
    let vote: VoteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(vote.dislikes, 1);
}

#[tokio::test]
async fn test_vote_on_missing_subject() {
    let server = TestServer::start().await.unwrap();
    let voter = server.signup().await.unwrap();

    let response = server
        .post_auth("/api/threads/999999/like", &voter.cookie)
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_SUBJECT");
}

#[tokio::test]
async fn test_vote_without_session() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();
    let thread = server.thread_by(&author).await.unwrap();

    let response = server
        .post_auth(&format!("/api/threads/{thread}/like"), "")
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "MISSING_SESSION");
}

// ============================================================================
// Subject Tests
// ============================================================================

#[tokio::test]
async fn test_create_thread_and_reply() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();
    let replier = server.signup().await.unwrap();

    let response = server
        .post_json_auth("/api/threads", &author.cookie, &json!({ "title": "Welcome" }))
        .await
        .unwrap();
    let thread: SubjectCreated = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(thread.kind, "thread");
    assert_eq!(thread.user_id, author.id.into_inner());
    assert!(thread.thread_id.is_none());

    let response = server
        .post_json_auth(
            &format!("/api/threads/{}/posts", thread.id),
            &replier.cookie,
            &json!({ "body": "thanks" }),
        )
        .await
        .unwrap();
    let post: SubjectCreated = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.kind, "post");
    assert_eq!(post.thread_id, Some(thread.id));

    // The author of the thread cannot like it, the replier can
    let like = format!("/api/threads/{}/like", thread.id);
    let response = server.post_auth(&like, &author.cookie).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    let response = server.post_auth(&like, &replier.cookie).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_reply_to_missing_thread() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();

    let response = server
        .post_json_auth("/api/threads/999999/posts", &author.cookie, &json!({ "body": "hi" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_SUBJECT");
}

#[tokio::test]
async fn test_create_thread_validation() {
    let server = TestServer::start().await.unwrap();
    let author = server.signup().await.unwrap();

    let response = server
        .post_json_auth("/api/threads", &author.cookie, &json!({ "title": "" }))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
}

// ============================================================================
// Presence Tests
// ============================================================================

#[tokio::test]
async fn test_online_users_follow_activity() {
    let server = TestServer::start().await.unwrap();
    let early = server.signup().await.unwrap();

    // Ten minutes later a second user logs in
    server.clock.set(slot(1210));
    let late = server.signup().await.unwrap();

    let response = server.get("/api/users/online?minutes=5").await.unwrap();
    let online: OnlineUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(online.threshold_minutes, 5);
    let ids: Vec<i64> = online.users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![late.id.into_inner()]);

    // Any authenticated request refreshes a stale session
    let response = server.get_auth("/api/auth/me", &early.cookie).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/api/users/online?minutes=5").await.unwrap();
    let online: OnlineUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(online.users.len(), 2);
}

#[tokio::test]
async fn test_online_listing_refreshes_viewer() {
    let server = TestServer::start().await.unwrap();
    let viewer = server.signup().await.unwrap();
    server.clock.set(slot(1230));

    let response = server
        .get_auth("/api/users/online?minutes=5", &viewer.cookie)
        .await
        .unwrap();
    let online: OnlineUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<i64> = online.users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![viewer.id.into_inner()]);
}

#[tokio::test]
async fn test_online_users_across_midnight() {
    let server = TestServer::start().await.unwrap();
    server.clock.set(slot(2358));
    let user = server.signup().await.unwrap();

    server.clock.set(slot(1));
    let response = server.get("/api/users/online").await.unwrap();
    let online: OnlineUsersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(online.users.iter().any(|u| u.id == user.id.into_inner()));
}

#[tokio::test]
async fn test_online_users_rejects_bad_window() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/users/online?minutes=2000").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[tokio::test]
async fn test_postgres_health_and_register() {
    if !check_test_env() {
        return;
    }

    let (addr, _handle) = start_postgres_server().await.expect("Failed to start server");
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let request = RegisterRequest::unique();
    let response = client
        .post(format!("http://{addr}/api/auth/register"))
        .json(&request)
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}
