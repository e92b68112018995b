//! `{id}` path segment extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use common::AppError;
use domain::UserId;

/// User id taken from the `{id}` path segment.
///
/// Anything that is not a non-negative integer rejects with 400 before the
/// handler (and therefore the repository) is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(e.body_text()))?;

        parse_user_id(&raw).map(UserIdPath)
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse::<UserId>()
        .map_err(|e| AppError::bad_request(format!("invalid user id `{}`: {}", raw, e)))
}
