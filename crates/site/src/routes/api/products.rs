//! Product API handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::products::{Product, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// How many related products to include in the detail payload.
const RELATED_LIMIT: i64 = 4;

/// List every product, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(Json(products))
}

/// Get one product by slug together with its related products.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Json<Value>> {
    let repo = ProductRepository::new(state.pool());

    let product = repo
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let related = match product.subcategory_id {
        Some(subcategory_id) => {
            repo.list_related(subcategory_id, product.id, RELATED_LIMIT)
                .await?
        }
        None => Vec::new(),
    };

    Ok(Json(json!({
        "data": {
            "product": product,
            "relatedProducts": related,
        }
    })))
}
