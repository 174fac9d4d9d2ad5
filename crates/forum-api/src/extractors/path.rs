//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use forum_core::SubjectId;
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct RawSubjectPath {
    id: String,
}

/// `:id` of a post or thread
#[derive(Debug, Clone, Copy)]
pub struct SubjectIdPath(pub SubjectId);

#[async_trait]
impl<S> FromRequestParts<S> for SubjectIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<RawSubjectPath>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        let id = raw
            .id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid id format"))?;

        Ok(SubjectIdPath(id))
    }
}
