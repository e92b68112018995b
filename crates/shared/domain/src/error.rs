//! Domain-level errors.
//!
//! Raised by value objects; the HTTP layer maps them onto `AppError`.

use thiserror::Error;

/// Errors raised while building domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Hashing a password failed
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl DomainError {
    pub fn hashing(msg: impl ToString) -> Self {
        DomainError::Hashing(msg.to_string())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
