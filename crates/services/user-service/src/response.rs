//! Response envelopes and route-level error mapping.

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{User, UserId, UserResponse};

/// `{"user": ...}`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

impl From<User> for UserEnvelope {
    fn from(user: User) -> Self {
        Self {
            user: UserResponse::from(user),
        }
    }
}

/// `{"users": [...]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct UsersEnvelope {
    pub users: Vec<UserResponse>,
}

impl From<Vec<User>> for UsersEnvelope {
    fn from(users: Vec<User>) -> Self {
        Self {
            users: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Body of `GET /users`: one user for a username lookup, all users otherwise.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UserListing {
    One(UserEnvelope),
    Many(UsersEnvelope),
}

/// 201 response with a `Location` header
pub struct Created<T: Serialize> {
    location: String,
    body: T,
}

impl<T: Serialize> Created<T> {
    pub fn at(location: String, body: T) -> Self {
        Self { location, body }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.body),
        )
            .into_response()
    }
}

/// Location of a newly created user: the request path joined with its id.
pub fn location_of(uri: &Uri, id: UserId) -> String {
    let path = uri.path();
    if path.ends_with('/') {
        format!("{}{}", path, id)
    } else {
        format!("{}/{}", path, id)
    }
}

/// A repository failure rendered with the status its route assigns.
///
/// The error code and message still come from the underlying `AppError`.
#[derive(Debug)]
pub struct RouteError {
    status: StatusCode,
    source: AppError,
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn source(&self) -> &AppError {
        &self.source
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        self.source.into_response_with_status(self.status)
    }
}

/// Extension trait for pinning a repository result's failure status.
pub trait RejectWith<T> {
    fn reject_with(self, status: StatusCode) -> Result<T, RouteError>;
}

impl<T> RejectWith<T> for AppResult<T> {
    fn reject_with(self, status: StatusCode) -> Result<T, RouteError> {
        self.map_err(|source| {
            tracing::debug!(code = source.code(), %status, "Repository call failed");
            RouteError { status, source }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_of() {
        let id = 7;
        assert_eq!(location_of(&Uri::from_static("/"), id), "/7");
        assert_eq!(location_of(&Uri::from_static("/users"), id), "/users/7");
        assert_eq!(location_of(&Uri::from_static("/users/"), id), "/users/7");
        assert_eq!(location_of(&Uri::from_static("/users/?x=1"), id), "/users/7");
    }

    #[test]
    fn test_reject_with_overrides_status() {
        let result: AppResult<()> = Err(AppError::conflict("Username"));
        let err = result.reject_with(StatusCode::BAD_REQUEST).unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(err.source(), AppError::Conflict(_)));
    }

    #[test]
    fn test_empty_listing_serializes_as_users_array() {
        let json = serde_json::to_value(UserListing::Many(UsersEnvelope::from(vec![]))).unwrap();
        assert_eq!(json, serde_json::json!({ "users": [] }));
    }
}
