//! Product repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use bazaar_core::{CategoryId, ProductId, SubcategoryId};

use super::RepositoryError;

/// A catalog product.
///
/// Sizes and colors are structured `text[]` columns rather than serialized
/// blobs, so option handling stays typed end to end.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_percent: Option<Decimal>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
    pub category_id: Option<CategoryId>,
    pub subcategory_id: Option<SubcategoryId>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price after applying the discount percentage, if any.
    #[must_use]
    pub fn discounted_price(&self) -> Option<Decimal> {
        self.discount_percent
            .map(|d| self.price * (Decimal::ONE_HUNDRED - d) / Decimal::ONE_HUNDRED)
    }
}

const PRODUCT_COLUMNS: &str = r"
    id, slug, name, description, price, discount_percent, stock,
    sizes, colors, images, category_id, subcategory_id,
    meta_title, meta_description, meta_keywords, created_at, updated_at
";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product by its numeric id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List the products of one subcategory, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_subcategory(
        &self,
        subcategory_id: SubcategoryId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE subcategory_id = $1 ORDER BY created_at DESC"
        ))
        .bind(subcategory_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// List products related to a product: same subcategory, excluding it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_related(
        &self,
        subcategory_id: SubcategoryId,
        exclude: ProductId,
        limit: i64,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE subcategory_id = $1 AND id <> $2
            ORDER BY created_at DESC
            LIMIT $3
            "
        ))
        .bind(subcategory_id)
        .bind(exclude)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: i64, discount: Option<i64>) -> Product {
        Product {
            id: ProductId::new(1),
            slug: "test".to_owned(),
            name: "Test".to_owned(),
            description: String::new(),
            price: Decimal::from(price),
            discount_percent: discount.map(Decimal::from),
            stock: 10,
            sizes: vec![],
            colors: vec![],
            images: vec![],
            category_id: None,
            subcategory_id: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(product(200, Some(25)).discounted_price(), Some(Decimal::from(150)));
        assert_eq!(product(200, None).discounted_price(), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(product(200, Some(10))).expect("serialize");
        assert!(json.get("discountPercent").is_some());
        assert!(json.get("subcategoryId").is_some());
    }
}
