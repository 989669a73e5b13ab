//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page (category grid)
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /category/{slug}         - Category page (subcategory grid)
//! GET  /subcategories/{slug}    - Subcategory page (product grid, min/max price filter)
//! GET  /products/{slug}         - Product detail with approved reviews
//!
//! # Cart
//! GET  /cart                    - Cart page
//! POST /cart/add                - Add item (product + size/color selection)
//! POST /cart/update             - Set line quantity (0 removes)
//! POST /cart/remove             - Remove line
//!
//! # JSON API
//! GET    /api/products                - All products
//! GET    /api/products/{slug}         - Product with related products
//! GET    /api/reviews[?productId=]    - Reviews with product details
//! POST   /api/reviews                 - Submit a review (lands in `pending`)
//! PUT    /api/reviews?id=             - Approve a review
//! DELETE /api/reviews?id=             - Delete a review
//! PUT    /api/reviews/{id}            - Overwrite a review
//! GET    /api/subcategories/{slug}    - Subcategory details
//! PUT    /api/subcategories/{slug}    - Update (slug recomputed from name)
//! DELETE /api/subcategories/{slug}    - Delete
//! GET    /api/social-links            - All social links
//! POST   /api/social-links            - Upsert by platform
//! DELETE /api/social-links?id=        - Delete
//! POST   /api/auth/forgot-password    - Issue a reset token
//! POST   /api/auth/reset-password     - Complete a reset
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use rust_decimal::Decimal;

use crate::state::AppState;

/// Format a decimal amount as a display price string.
pub(crate) fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create all page and API routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog pages
        .route("/category/{slug}", get(catalog::category))
        .route("/subcategories/{slug}", get(catalog::subcategory))
        .route("/products/{slug}", get(products::show))
        // Cart routes
        .nest("/cart", cart_routes())
        // JSON API
        .nest("/api", api::routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(Decimal::from(1500)), "$1500.00");
        assert_eq!(format_price(Decimal::new(4999, 2)), "$49.99");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
