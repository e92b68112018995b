//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The request and response schemas used by the HTTP layer live here too, so
//! the repository and the router agree on one shape per operation.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{CreateUser, UpdateUser, User, UserId, UserResponse};
