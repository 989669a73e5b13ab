//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::db::products::{Product, ProductRepository};
use crate::db::reviews::{Review, ReviewRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::catalog::ProductCardView;
use crate::routes::format_price;
use crate::state::AppState;

/// How many related products to show under the detail view.
const RELATED_LIMIT: i64 = 4;

/// Product display data for the detail template.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub price: String,
    pub discounted_price: Option<String>,
    pub stock: i32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub images: Vec<String>,
}

impl From<&Product> for ProductDetailView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            meta_title: product.meta_title.clone(),
            meta_description: product.meta_description.clone(),
            price: format_price(product.price),
            discounted_price: product.discounted_price().map(format_price),
            stock: product.stock,
            sizes: product.sizes.clone(),
            colors: product.colors.clone(),
            images: product.images.clone(),
        }
    }
}

/// Review display data for templates.
#[derive(Clone)]
pub struct ReviewView {
    pub reviewer: String,
    pub stars: String,
    pub comment: String,
    pub date: String,
}

impl From<&Review> for ReviewView {
    fn from(review: &Review) -> Self {
        Self {
            reviewer: review.reviewer.clone(),
            stars: render_stars(review.rating),
            comment: review.comment.clone(),
            date: review.created_at.format("%B %-d, %Y").to_string(),
        }
    }
}

/// Render a 1-5 rating as filled and empty stars.
fn render_stars(rating: i32) -> String {
    let filled = usize::try_from(rating.clamp(0, 5)).unwrap_or(0);
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
    pub reviews: Vec<ReviewView>,
    pub related_products: Vec<ProductCardView>,
}

/// Display a product detail page with its approved reviews.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let products = ProductRepository::new(state.pool());
    let reviews_repo = ReviewRepository::new(state.pool());

    let (product, reviews) = tokio::join!(
        products.get_by_slug(&slug),
        reviews_repo.list_active_for_product_slug(&slug),
    );

    let product = product?.ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    // A review failure should not take down the product page
    let reviews = match reviews {
        Ok(reviews) => reviews.iter().map(ReviewView::from).collect(),
        Err(e) => {
            tracing::warn!("Failed to load reviews for {slug}: {e}");
            Vec::new()
        }
    };

    let related_products = match product.subcategory_id {
        Some(subcategory_id) => products
            .list_related(subcategory_id, product.id, RELATED_LIMIT)
            .await?
            .iter()
            .map(ProductCardView::from)
            .collect(),
        None => Vec::new(),
    };

    Ok(ProductShowTemplate {
        product: ProductDetailView::from(&product),
        reviews,
        related_products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars(0), "☆☆☆☆☆");
        assert_eq!(render_stars(3), "★★★☆☆");
        assert_eq!(render_stars(5), "★★★★★");
        // Out-of-range ratings are clamped rather than panicking
        assert_eq!(render_stars(9), "★★★★★");
        assert_eq!(render_stars(-2), "☆☆☆☆☆");
    }
}
