//! Cart route handlers.
//!
//! The cart lives in the session. Add requests carry the product id plus
//! the selected size and color; a product that defines sizes or colors
//! requires a matching selection before the line is accepted. Prices are
//! snapshotted into the cart line at add time.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::Redirect,
};
use bazaar_core::{Cart, CartKey, CartLine};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::{CartStore, SessionCartStore};
use crate::db::products::{Product, ProductRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::format_price;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .lines()
                .iter()
                .map(|line| CartItemView {
                    product_id: line.key.product_id.as_i32(),
                    name: line.name.clone(),
                    size: line.key.size.clone(),
                    color: line.key.color.clone(),
                    quantity: line.quantity,
                    price: format_price(line.effective_unit_price()),
                    line_price: format_price(line.line_total()),
                    image: line.image.clone(),
                })
                .collect(),
            subtotal: format_price(cart.subtotal()),
            item_count: cart.item_count(),
        }
    }
}

/// Treat empty form fields as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    pub quantity: Option<u32>,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: i32,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i32,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Validate an add request against the product and build the cart line.
fn build_line(product: &Product, form: &AddToCartForm) -> std::result::Result<CartLine, AppError> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("Quantity must be at least 1".to_string()));
    }
    if product.stock <= 0 {
        return Err(AppError::BadRequest("Product is out of stock".to_string()));
    }
    if i64::from(quantity) > i64::from(product.stock) {
        return Err(AppError::BadRequest(format!(
            "Only {} left in stock",
            product.stock
        )));
    }

    let size = non_empty(form.size.clone());
    if !product.sizes.is_empty() {
        match &size {
            Some(size) if product.sizes.contains(size) => {}
            Some(_) => return Err(AppError::BadRequest("Unknown size".to_string())),
            None => return Err(AppError::BadRequest("Please select a size".to_string())),
        }
    }

    let color = non_empty(form.color.clone());
    if !product.colors.is_empty() {
        match &color {
            Some(color) if product.colors.contains(color) => {}
            Some(_) => return Err(AppError::BadRequest("Unknown color".to_string())),
            None => return Err(AppError::BadRequest("Please select a color".to_string())),
        }
    }

    Ok(CartLine {
        key: CartKey {
            product_id: product.id,
            size,
            color,
        },
        name: product.name.clone(),
        quantity,
        unit_price: product.price,
        discount_percent: product.discount_percent,
        image: product.images.first().cloned(),
    })
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = SessionCartStore::new(session).load().await?;

    Ok(CartShowTemplate {
        cart: CartView::from(&cart),
    })
}

/// Add an item to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product = ProductRepository::new(state.pool())
        .get_by_id(form.product_id.into())
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let line = build_line(&product, &form)?;

    let store = SessionCartStore::new(session);
    let mut cart = store.load().await?;
    cart.merge(line);
    store.save(&cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Set a cart line's quantity; zero removes the line.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let key = CartKey {
        product_id: form.product_id.into(),
        size: non_empty(form.size),
        color: non_empty(form.color),
    };

    let store = SessionCartStore::new(session);
    let mut cart = store.load().await?;
    if cart.set_quantity(&key, form.quantity) {
        store.save(&cart).await?;
    }

    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let key = CartKey {
        product_id: form.product_id.into(),
        size: non_empty(form.size),
        color: non_empty(form.color),
    };

    let store = SessionCartStore::new(session);
    let mut cart = store.load().await?;
    if cart.remove(&key) {
        store.save(&cart).await?;
    }

    Ok(Redirect::to("/cart"))
}

#[cfg(test)]
mod tests {
    use bazaar_core::ProductId;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;

    fn product(sizes: &[&str], colors: &[&str], stock: i32) -> Product {
        Product {
            id: ProductId::new(7),
            slug: "tee".to_owned(),
            name: "Tee".to_owned(),
            description: String::new(),
            price: Decimal::from(40),
            discount_percent: Some(Decimal::from(10)),
            stock,
            sizes: sizes.iter().map(|s| (*s).to_owned()).collect(),
            colors: colors.iter().map(|c| (*c).to_owned()).collect(),
            images: vec!["/img/tee.jpg".to_owned()],
            category_id: None,
            subcategory_id: None,
            meta_title: None,
            meta_description: None,
            meta_keywords: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn form(quantity: Option<u32>, size: Option<&str>, color: Option<&str>) -> AddToCartForm {
        AddToCartForm {
            product_id: 7,
            quantity,
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        }
    }

    #[test]
    fn test_build_line_snapshots_product() {
        let line = build_line(&product(&["M"], &[], 5), &form(Some(2), Some("M"), None))
            .expect("line");

        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, Decimal::from(40));
        assert_eq!(line.discount_percent, Some(Decimal::from(10)));
        assert_eq!(line.key.size.as_deref(), Some("M"));
        assert_eq!(line.image.as_deref(), Some("/img/tee.jpg"));
    }

    #[test]
    fn test_build_line_requires_size_when_product_has_sizes() {
        let result = build_line(&product(&["S", "M"], &[], 5), &form(Some(1), None, None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        // Empty string counts as no selection
        let result = build_line(&product(&["S", "M"], &[], 5), &form(Some(1), Some(""), None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_build_line_rejects_unknown_color() {
        let result = build_line(
            &product(&[], &["red", "blue"], 5),
            &form(Some(1), None, Some("green")),
        );
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_build_line_rejects_out_of_stock() {
        let result = build_line(&product(&[], &[], 0), &form(Some(1), None, None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_build_line_bounds_quantity_by_stock() {
        let result = build_line(&product(&[], &[], 3), &form(Some(4), None, None));
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        assert!(build_line(&product(&[], &[], 3), &form(Some(3), None, None)).is_ok());
    }

    #[test]
    fn test_build_line_defaults_quantity_to_one() {
        let line = build_line(&product(&[], &[], 5), &form(None, None, None)).expect("line");
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_cart_view_formats_totals() {
        let mut cart = Cart::default();
        let line = build_line(&product(&[], &[], 5), &form(Some(2), None, None)).expect("line");
        cart.merge(line);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        // 40 with 10% off is 36 per unit
        assert_eq!(view.items[0].price, "$36.00");
        assert_eq!(view.subtotal, "$72.00");
    }
}
