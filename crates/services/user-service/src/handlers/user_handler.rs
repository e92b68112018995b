//! User handlers.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::IntoParams;

use domain::{CreateUser, UpdateUser};

use crate::extractors::{UserIdPath, ValidatedJson};
use crate::repository::UserRepository;
use crate::response::{
    location_of, Created, RejectWith, RouteError, UserEnvelope, UserListing, UsersEnvelope,
};

/// Query string of `GET /users`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Look up a single user by username instead of listing all
    pub username: Option<String>,
}

/// Create user routes backed by the given repository.
///
/// The collection answers on both `/users` and `/users/`.
pub fn user_routes(users: Arc<dyn UserRepository>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route("/users/:id/", get(get_user).put(update_user).delete(delete_user))
        .with_state(users)
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserEnvelope,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Malformed body, validation error or username taken")
    )
)]
pub async fn create_user(
    State(users): State<Arc<dyn UserRepository>>,
    OriginalUri(uri): OriginalUri,
    ValidatedJson(payload): ValidatedJson<CreateUser>,
) -> Result<Created<UserEnvelope>, RouteError> {
    let user = users
        .create(payload)
        .await
        .reject_with(StatusCode::BAD_REQUEST)?;

    let location = location_of(&uri, user.id);
    Ok(Created::at(location, UserEnvelope::from(user)))
}

/// List all users, or look one up by username
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "All users, or `{\"user\": ...}` when `username` is given", body = UsersEnvelope),
        (status = 404, description = "No user with that username, or the store failed")
    )
)]
pub async fn list_users(
    State(users): State<Arc<dyn UserRepository>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListing>, RouteError> {
    match query.username.filter(|username| !username.is_empty()) {
        Some(username) => {
            let user = users
                .get_by_username(&username)
                .await
                .reject_with(StatusCode::NOT_FOUND)?;
            Ok(Json(UserListing::One(UserEnvelope::from(user))))
        }
        None => {
            let all = users.get_all().await.reject_with(StatusCode::NOT_FOUND)?;
            Ok(Json(UserListing::Many(UsersEnvelope::from(all))))
        }
    }
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}/",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserEnvelope),
        (status = 400, description = "ID is not a non-negative integer"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(users): State<Arc<dyn UserRepository>>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<UserEnvelope>, RouteError> {
    let user = users.get_one(id).await.reject_with(StatusCode::NOT_FOUND)?;
    Ok(Json(UserEnvelope::from(user)))
}

/// Replace a user's profile fields
#[utoipa::path(
    put,
    path = "/users/{id}/",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Bad ID, malformed body or validation error"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(users): State<Arc<dyn UserRepository>>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(changes): ValidatedJson<UpdateUser>,
) -> Result<Json<UserEnvelope>, RouteError> {
    let user = users
        .update(id, changes)
        .await
        .reject_with(StatusCode::NOT_FOUND)?;
    Ok(Json(UserEnvelope::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}/",
    tag = "Users",
    params(
        ("id" = u64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted, empty object body"),
        (status = 400, description = "ID is not a non-negative integer"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(users): State<Arc<dyn UserRepository>>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<Value>, RouteError> {
    users.delete(id).await.reject_with(StatusCode::NOT_FOUND)?;
    Ok(Json(json!({})))
}
