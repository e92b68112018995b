//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::response::{UserEnvelope, UsersEnvelope};
use domain::{CreateUser, UpdateUser, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            CreateUser,
            UpdateUser,
            UserResponse,
            UserEnvelope,
            UsersEnvelope,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
