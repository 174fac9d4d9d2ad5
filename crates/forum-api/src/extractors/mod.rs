//! Axum extractors for request handling
//!
//! Session cookie authentication, typed path ids, and validated bodies/queries.

mod auth;
mod path;
mod validated;

pub use auth::{OptionalSessionUser, SessionUser};
pub use path::SubjectIdPath;
pub use validated::{ValidatedJson, ValidatedQuery};
