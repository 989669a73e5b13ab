//! Subcategory repository for database operations.
//!
//! Subcategories are addressed by slug throughout the admin API. The slug
//! is always derived from the name with [`bazaar_core::slugify`] and is
//! regenerated on every update, so renaming a subcategory moves it to a
//! new URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use bazaar_core::{CategoryId, SubcategoryId, slugify};

use super::RepositoryError;

/// A catalog subcategory belonging to one category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Replacement field set for a subcategory update.
///
/// The slug is not part of the input; it is recomputed from `name`.
#[derive(Debug, Clone)]
pub struct SubcategoryUpdate {
    pub name: String,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

const SUBCATEGORY_COLUMNS: &str = r"
    id, category_id, name, slug, image_url,
    meta_title, meta_description, meta_keywords, created_at, updated_at
";

/// Repository for subcategory database operations.
pub struct SubcategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubcategoryRepository<'a> {
    /// Create a new subcategory repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a subcategory by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Subcategory>, RepositoryError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLUMNS} FROM subcategories WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(subcategory)
    }

    /// List the subcategories of one category in name order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_category(
        &self,
        category_id: CategoryId,
    ) -> Result<Vec<Subcategory>, RepositoryError> {
        let subcategories = sqlx::query_as::<_, Subcategory>(&format!(
            "SELECT {SUBCATEGORY_COLUMNS} FROM subcategories WHERE category_id = $1 ORDER BY name ASC"
        ))
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(subcategories)
    }

    /// Overwrite a subcategory's fields, recomputing its slug from the
    /// (possibly new) name and bumping `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no subcategory has this slug.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        slug: &str,
        update: &SubcategoryUpdate,
    ) -> Result<Subcategory, RepositoryError> {
        let new_slug = slugify(&update.name);

        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            r"
            UPDATE subcategories
            SET name = $2, slug = $3, category_id = $4, image_url = $5,
                meta_title = $6, meta_description = $7, meta_keywords = $8,
                updated_at = NOW()
            WHERE slug = $1
            RETURNING {SUBCATEGORY_COLUMNS}
            "
        ))
        .bind(slug)
        .bind(&update.name)
        .bind(&new_slug)
        .bind(update.category_id)
        .bind(&update.image_url)
        .bind(&update.meta_title)
        .bind(&update.meta_description)
        .bind(&update.meta_keywords)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(subcategory)
    }

    /// Delete a subcategory by slug, returning the deleted row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no subcategory has this slug.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_slug(&self, slug: &str) -> Result<Subcategory, RepositoryError> {
        let subcategory = sqlx::query_as::<_, Subcategory>(&format!(
            "DELETE FROM subcategories WHERE slug = $1 RETURNING {SUBCATEGORY_COLUMNS}"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(subcategory)
    }
}
