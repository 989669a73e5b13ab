//! Catalog page route handlers.
//!
//! The category page lists a category's subcategories; the subcategory
//! page lists its products with a price filter. The filter works on the
//! undiscounted list price; discounts affect only the displayed amount.
//! When the filter is absent it is seeded with the highest list price on
//! the page, so the slider starts with every product visible.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::db::categories::CategoryRepository;
use crate::db::products::Product;
use crate::db::products::ProductRepository;
use crate::db::subcategories::SubcategoryRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Subcategory display data for templates.
#[derive(Clone)]
pub struct SubcategoryCardView {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

/// Product display data for grid templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub name: String,
    pub slug: String,
    pub price: String,
    pub discounted_price: Option<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: format_price(product.price),
            discounted_price: product.discounted_price().map(format_price),
            image: product.images.first().cloned(),
            in_stock: product.stock > 0,
        }
    }
}

/// Highest list price among these products; zero when there are none.
fn price_ceiling(products: &[Product]) -> Decimal {
    products
        .iter()
        .map(|p| p.price)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Keep products whose list price falls inside the bounds.
fn filter_by_price(products: &[Product], lower: Decimal, upper: Decimal) -> Vec<&Product> {
    products
        .iter()
        .filter(|p| (lower..=upper).contains(&p.price))
        .collect()
}

/// Price filter query parameters.
#[derive(Debug, Deserialize)]
pub struct PriceFilterQuery {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

/// Category page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/category.html")]
pub struct CategoryTemplate {
    pub name: String,
    pub subcategories: Vec<SubcategoryCardView>,
}

/// Subcategory page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/subcategory.html")]
pub struct SubcategoryTemplate {
    pub name: String,
    pub slug: String,
    pub products: Vec<ProductCardView>,
    pub min_price: String,
    pub max_price: String,
    pub price_ceiling: String,
}

/// Display a category page with its subcategory grid.
#[instrument(skip(state))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<CategoryTemplate> {
    let category = CategoryRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Category".to_string()))?;

    let subcategories = SubcategoryRepository::new(state.pool())
        .list_for_category(category.id)
        .await?
        .into_iter()
        .map(|s| SubcategoryCardView {
            name: s.name,
            slug: s.slug,
            image_url: s.image_url,
        })
        .collect();

    Ok(CategoryTemplate {
        name: category.name,
        subcategories,
    })
}

/// Display a subcategory page with its filtered product grid.
#[instrument(skip(state))]
pub async fn subcategory(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PriceFilterQuery>,
) -> Result<SubcategoryTemplate> {
    let subcategory = SubcategoryRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Subcategory".to_string()))?;

    let all_products = ProductRepository::new(state.pool())
        .list_for_subcategory(subcategory.id)
        .await?;

    // The slider ceiling is the highest list price in the subcategory;
    // without an explicit filter it doubles as the active upper bound.
    let ceiling = price_ceiling(&all_products);
    let upper = query.max_price.unwrap_or(ceiling);
    let lower = query.min_price.unwrap_or(Decimal::ZERO);

    let products = filter_by_price(&all_products, lower, upper)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    Ok(SubcategoryTemplate {
        name: subcategory.name,
        slug: subcategory.slug,
        products,
        min_price: lower.to_string(),
        max_price: upper.to_string(),
        price_ceiling: ceiling.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use bazaar_core::ProductId;
    use chrono::Utc;

    use super::*;

    fn product(price: i64, discount: Option<i64>, stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            slug: "shirt".to_owned(),
            name: "Shirt".to_owned(),
            description: String::new(),
            price: Decimal::from(price),
            discount_percent: discount.map(Decimal::from),
            stock,
            sizes: vec![],
            colors: vec![],
            images: vec!["/img/shirt.jpg".to_owned()],
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
    fn test_price_ceiling_uses_list_price() {
        // The 50%-off product still counts at its full 200 list price
        let products = vec![product(200, Some(50), 1), product(150, None, 1)];
        assert_eq!(price_ceiling(&products), Decimal::from(200));

        assert_eq!(price_ceiling(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_filter_matches_on_list_price() {
        // Discounted to 100 effective, but filtering sees the 200 list price
        let products = vec![product(200, Some(50), 1), product(150, None, 1)];

        let kept = filter_by_price(&products, Decimal::ZERO, Decimal::from(150));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].price, Decimal::from(150));
    }

    #[test]
    fn test_filter_lower_bound() {
        let products = vec![product(50, None, 1), product(120, None, 1)];

        let kept = filter_by_price(&products, Decimal::from(100), Decimal::from(200));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].price, Decimal::from(120));
    }

    #[test]
    fn test_card_view_formats_prices() {
        let card = ProductCardView::from(&product(200, Some(25), 0));
        assert_eq!(card.price, "$200.00");
        assert_eq!(card.discounted_price.as_deref(), Some("$150.00"));
        assert!(!card.in_stock);
        assert_eq!(card.image.as_deref(), Some("/img/shirt.jpg"));
    }
}
