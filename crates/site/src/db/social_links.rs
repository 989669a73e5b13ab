//! Social-media link repository for database operations.
//!
//! Links are keyed by platform name; setting a platform that already has
//! a link replaces its URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use bazaar_core::SocialLinkId;

use super::RepositoryError;

/// A configured social-media link.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: SocialLinkId,
    pub platform: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for social-media link operations.
pub struct SocialLinkRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SocialLinkRepository<'a> {
    /// Create a new social-link repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every configured link in platform order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<SocialLink>, RepositoryError> {
        let links = sqlx::query_as::<_, SocialLink>(
            r"
            SELECT id, platform, url, created_at, updated_at
            FROM social_links
            ORDER BY platform ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(links)
    }

    /// Insert or replace the link for a platform.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(&self, platform: &str, url: &str) -> Result<SocialLink, RepositoryError> {
        let link = sqlx::query_as::<_, SocialLink>(
            r"
            INSERT INTO social_links (platform, url)
            VALUES ($1, $2)
            ON CONFLICT (platform) DO UPDATE SET url = $2, updated_at = NOW()
            RETURNING id, platform, url, created_at, updated_at
            ",
        )
        .bind(platform)
        .bind(url)
        .fetch_one(self.pool)
        .await?;

        Ok(link)
    }

    /// Delete a link by id, returning the deleted row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no link has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: SocialLinkId) -> Result<SocialLink, RepositoryError> {
        let link = sqlx::query_as::<_, SocialLink>(
            r"
            DELETE FROM social_links
            WHERE id = $1
            RETURNING id, platform, url, created_at, updated_at
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(link)
    }
}
