//! Password value object.
//!
//! The plain text never leaves this module; only the argon2 PHC string is
//! handed to storage. Password rules are checked on `CreateUser` before a
//! `Password` is built.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Salted argon2 hash of a user password.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

impl Password {
    /// Hash `plain_text` with a fresh salt.
    ///
    /// # Errors
    /// `Hashing` if argon2 fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(DomainError::hashing)?
            .to_string();

        Ok(Self { hash })
    }

    /// PHC string for `users.password_hash`.
    pub fn into_string(self) -> String {
        self.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_argon2_phc_string() {
        let hash = Password::new("hunter2").unwrap().into_string();

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn test_salts_differ() {
        let a = Password::new("same").unwrap().into_string();
        let b = Password::new("same").unwrap().into_string();

        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_redacts_hash() {
        let password = Password::new("secret").unwrap();
        let debug = format!("{:?}", password);

        assert_eq!(debug, "Password([REDACTED])");
    }
}
