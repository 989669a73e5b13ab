//! Password-reset service.
//!
//! Issues time-limited reset tokens and completes resets by hashing the
//! new password with Argon2id. Token consumption is a single UPDATE that
//! also clears the token fields, so a token can never be replayed.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// How long an issued reset token stays valid.
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Authentication service errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The new password does not meet requirements.
    #[error("weak password: {0}")]
    WeakPassword(String),

    /// The reset token is unknown, already used, or past its expiry.
    #[error("invalid or expired reset token")]
    InvalidOrExpiredToken,

    /// Password hashing failed.
    #[error("password hashing failed")]
    PasswordHash,

    /// Underlying repository failure.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Service handling the password-reset flow.
pub struct PasswordResetService<'a> {
    users: UserRepository<'a>,
}

impl<'a> PasswordResetService<'a> {
    /// Create a new password-reset service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Issue a fresh reset token for the account with this email.
    ///
    /// Returns `None` when no account matches; callers must respond
    /// identically in both cases so the endpoint cannot be used to probe
    /// for registered emails.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn request_reset(&self, email: &str) -> Result<Option<String>, AuthError> {
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        let stored = self.users.set_reset_token(email, &token, expires_at).await?;

        Ok(stored.then_some(token))
    }

    /// Complete a password reset.
    ///
    /// Hashes the new password and consumes the token atomically. After a
    /// successful call the same token fails with
    /// `AuthError::InvalidOrExpiredToken`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::InvalidOrExpiredToken` if the token does not
    /// match an unexpired row.
    /// Returns `AuthError::Repository` if the database operation fails.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let password_hash = hash_password(new_password)?;

        if self.users.consume_reset_token(token, &password_hash).await? {
            Ok(())
        } else {
            Err(AuthError::InvalidOrExpiredToken)
        }
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
#[cfg(test)]
fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_hash_password_salted_and_verifiable() {
        let first = hash_password("correct horse battery").expect("hash");
        let second = hash_password("correct horse battery").expect("hash");

        // Fresh salt per hash
        assert_ne!(first, second);

        assert!(verify_password("correct horse battery", &first));
        assert!(!verify_password("wrong password", &first));
    }
}
