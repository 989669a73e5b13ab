//! Review repository for database operations.
//!
//! Reviews carry a moderation status (`pending` until approved, then
//! `active`); the status is stored as text and parsed on the way out.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use bazaar_core::{ProductId, ReviewId, ReviewStatus};

use super::RepositoryError;

/// A customer review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub reviewer: String,
    pub rating: i32,
    pub comment: String,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
}

/// Product details joined onto a review for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewProduct {
    pub name: String,
    pub slug: String,
}

/// A review together with the product it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithProduct {
    #[serde(flatten)]
    pub review: Review,
    pub product: ReviewProduct,
}

/// Replacement field set for a full review update.
#[derive(Debug, Clone)]
pub struct ReviewUpdate {
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: String,
    pub status: ReviewStatus,
}

/// Internal row type for review queries.
#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    id: i32,
    product_id: i32,
    reviewer: String,
    rating: i32,
    comment: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = RepositoryError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let status: ReviewStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid review status in database: {e}"))
        })?;

        Ok(Self {
            id: ReviewId::new(row.id),
            product_id: ProductId::new(row.product_id),
            reviewer: row.reviewer,
            rating: row.rating,
            comment: row.comment,
            status,
            created_at: row.created_at,
        })
    }
}

/// Internal row type for reviews joined with product details.
#[derive(Debug, sqlx::FromRow)]
struct ReviewWithProductRow {
    id: i32,
    product_id: i32,
    reviewer: String,
    rating: i32,
    comment: String,
    status: String,
    created_at: DateTime<Utc>,
    product_name: String,
    product_slug: String,
}

impl TryFrom<ReviewWithProductRow> for ReviewWithProduct {
    type Error = RepositoryError;

    fn try_from(row: ReviewWithProductRow) -> Result<Self, Self::Error> {
        let product = ReviewProduct {
            name: row.product_name,
            slug: row.product_slug,
        };
        let review = Review::try_from(ReviewRow {
            id: row.id,
            product_id: row.product_id,
            reviewer: row.reviewer,
            rating: row.rating,
            comment: row.comment,
            status: row.status,
            created_at: row.created_at,
        })?;

        Ok(Self { review, product })
    }
}

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new review in `pending` status.
    ///
    /// Rating bounds are the caller's responsibility; this only persists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(
        &self,
        product_id: ProductId,
        reviewer: &str,
        rating: i32,
        comment: &str,
    ) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            INSERT INTO reviews (product_id, reviewer, rating, comment, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, product_id, reviewer, rating, comment, status, created_at
            ",
        )
        .bind(product_id)
        .bind(reviewer)
        .bind(rating)
        .bind(comment)
        .bind(ReviewStatus::Pending.to_string())
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List all reviews with product details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ReviewWithProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewWithProductRow>(
            r"
            SELECT r.id, r.product_id, r.reviewer, r.rating, r.comment, r.status, r.created_at,
                   p.name AS product_name, p.slug AS product_slug
            FROM reviews r
            JOIN products p ON p.id = r.product_id
            ORDER BY r.created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List one product's reviews with product details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<ReviewWithProduct>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewWithProductRow>(
            r"
            SELECT r.id, r.product_id, r.reviewer, r.rating, r.comment, r.status, r.created_at,
                   p.name AS product_name, p.slug AS product_slug
            FROM reviews r
            JOIN products p ON p.id = r.product_id
            WHERE r.product_id = $1
            ORDER BY r.created_at DESC
            ",
        )
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List a product's `active` reviews by product slug, newest first.
    ///
    /// Used by the public product page, which only shows approved reviews.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_for_product_slug(
        &self,
        slug: &str,
    ) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT r.id, r.product_id, r.reviewer, r.rating, r.comment, r.status, r.created_at
            FROM reviews r
            JOIN products p ON p.id = r.product_id
            WHERE p.slug = $1 AND r.status = $2
            ORDER BY r.created_at DESC
            ",
        )
        .bind(slug)
        .bind(ReviewStatus::Active.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Approve a review, setting its status to `active`.
    ///
    /// All other fields are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn approve(&self, id: ReviewId) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            UPDATE reviews
            SET status = $2
            WHERE id = $1
            RETURNING id, product_id, reviewer, rating, comment, status, created_at
            ",
        )
        .bind(id)
        .bind(ReviewStatus::Active.to_string())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Overwrite a review's full field set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ReviewId,
        update: &ReviewUpdate,
    ) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            UPDATE reviews
            SET product_id = $2, rating = $3, comment = $4, status = $5
            WHERE id = $1
            RETURNING id, product_id, reviewer, rating, comment, status, created_at
            ",
        )
        .bind(id)
        .bind(update.product_id)
        .bind(update.rating)
        .bind(&update.comment)
        .bind(update.status.to_string())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a review by id, returning the deleted row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no review has this id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ReviewId) -> Result<Review, RepositoryError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r"
            DELETE FROM reviews
            WHERE id = $1
            RETURNING id, product_id, reviewer, rating, comment, status, created_at
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }
}
