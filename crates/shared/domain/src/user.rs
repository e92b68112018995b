//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Store-assigned user identifier.
pub type UserId = u64;

/// User domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a freshly stored user from a creation payload.
    ///
    /// Used by stores that assign ids themselves (the SQL store lets the
    /// database do it instead).
    pub fn new(id: UserId, input: CreateUser, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: input.username,
            password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            picture: input.picture,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable profile field with the given values.
    ///
    /// Fields absent from `changes` are cleared.
    pub fn replace_profile(&mut self, changes: UpdateUser) {
        self.first_name = changes.first_name;
        self.last_name = changes.last_name;
        self.email = changes.email;
        self.picture = changes.picture;
        self.updated_at = Utc::now();
    }
}

/// Payload of `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateUser {
    /// Unique login name
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    /// Plain text password, hashed before storage
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Avatar URL
    pub picture: Option<String>,
}

/// Payload of `PUT /users/{id}/`
///
/// Full replace of the profile fields: a missing field clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Avatar URL
    pub picture: Option<String>,
}

/// User as returned to clients.
///
/// `password` is write-only: it is always serialized empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    /// Unique user identifier
    pub id: UserId,
    pub username: String,
    /// Always empty
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password: String::new(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            picture: user.picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(username: &str, password: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            password: password.to_string(),
            first_name: Some("Alice".to_string()),
            last_name: None,
            email: Some("alice@example.com".to_string()),
            picture: None,
        }
    }

    #[test]
    fn test_response_never_carries_password() {
        let user = User::new(7, create_input("alice", "x"), "$argon2id$hash".to_string());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["password"], "");
        assert!(!json.to_string().contains("argon2"));
    }

    #[test]
    fn test_response_omits_absent_profile_fields() {
        let user = User::new(1, create_input("alice", "x"), "hash".to_string());
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        assert_eq!(json["first_name"], "Alice");
        assert!(json.get("last_name").is_none());
        assert!(json.get("picture").is_none());
    }

    #[test]
    fn test_replace_profile_clears_missing_fields() {
        let mut user = User::new(1, create_input("alice", "x"), "hash".to_string());
        user.replace_profile(UpdateUser {
            last_name: Some("Liddell".to_string()),
            ..UpdateUser::default()
        });

        assert_eq!(user.first_name, None);
        assert_eq!(user.email, None);
        assert_eq!(user.last_name.as_deref(), Some("Liddell"));
        assert_eq!(user.username, "alice");
    }

    #[test]
    fn test_create_user_ignores_unknown_fields() {
        let input: CreateUser =
            serde_json::from_str(r#"{"id":99,"username":"alice","password":"x"}"#).unwrap();

        assert_eq!(input.username, "alice");
        assert_eq!(input.email, None);
    }

    #[test]
    fn test_create_user_validation() {
        assert!(create_input("alice", "x").validate().is_ok());
        assert!(create_input("", "x").validate().is_err());
        assert!(create_input("alice", "").validate().is_err());
        assert!(create_input(&"a".repeat(65), "x").validate().is_err());
    }

    #[test]
    fn test_update_user_rejects_bad_email() {
        let changes = UpdateUser {
            email: Some("not-an-email".to_string()),
            ..UpdateUser::default()
        };
        assert!(changes.validate().is_err());
        assert!(UpdateUser::default().validate().is_ok());
    }
}
