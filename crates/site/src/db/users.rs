//! User repository for database operations.
//!
//! Only the password-reset surface is exposed here; account registration
//! and login live behind the external auth layer and are out of scope.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::RepositoryError;

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Attach a fresh reset token to the user with this email.
    ///
    /// Any previously issued token is overwritten. Returns `false` if no
    /// user has this email; callers must not leak that distinction to the
    /// client.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn set_reset_token(
        &self,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET reset_token = $2, reset_token_expires = $3, updated_at = NOW()
            WHERE email = $1
            ",
        )
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Consume a reset token: set the new password hash and clear both
    /// token fields in one statement.
    ///
    /// The single UPDATE matches only an unexpired token, so a concurrent
    /// or repeated attempt with the same token affects zero rows and the
    /// token cannot be replayed. Returns `false` when the token is unknown
    /// or expired.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, reset_token = NULL, reset_token_expires = NULL,
                updated_at = NOW()
            WHERE reset_token = $1 AND reset_token_expires > NOW()
            ",
        )
        .bind(token)
        .bind(password_hash)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
