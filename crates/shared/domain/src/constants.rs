//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Validation
// =============================================================================

/// Maximum username length (the `users.username` column width)
pub const MAX_USERNAME_LENGTH: u32 = 64;
