//! Category repository for database operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use bazaar_core::CategoryId;

use super::RepositoryError;

/// A top-level catalog category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every category in name order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, image_url, meta_title, meta_description, meta_keywords,
                   created_at, updated_at
            FROM categories
            ORDER BY name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, image_url, meta_title, meta_description, meta_keywords,
                   created_at, updated_at
            FROM categories
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }
}
