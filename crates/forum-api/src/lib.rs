//! # forum-api
//!
//! JSON API over the vote engine and session tracker, built with Axum.
//! Sessions travel in a cookie holding the `"<userId>&<uuid>"` token.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;
