//! Subcategory API handlers.
//!
//! Subcategories are addressed by slug. Updating one recomputes its slug
//! from the submitted name, so the response carries the new address.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;
use tracing::instrument;

use bazaar_core::CategoryId;

use crate::db::subcategories::{SubcategoryRepository, SubcategoryUpdate};
use crate::error::{AppError, Result};
use crate::routes::api::Envelope;
use crate::state::AppState;

/// Subcategory replacement payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryPayload {
    pub name: String,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
}

/// Get a subcategory by slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let subcategory = SubcategoryRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Subcategory".to_string()))?;

    Ok(Envelope::ok("Subcategory found", subcategory))
}

/// Overwrite a subcategory's fields, recomputing its slug from the name.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<SubcategoryPayload>,
) -> Result<Response> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }

    let subcategory = SubcategoryRepository::new(state.pool())
        .update(
            &slug,
            &SubcategoryUpdate {
                name: name.to_string(),
                category_id: payload.category_id,
                image_url: payload.image_url,
                meta_title: payload.meta_title,
                meta_description: payload.meta_description,
                meta_keywords: payload.meta_keywords,
            },
        )
        .await?;

    Ok(Envelope::ok("Subcategory updated", subcategory))
}

/// Delete a subcategory by slug, returning the deleted row.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response> {
    let subcategory = SubcategoryRepository::new(state.pool())
        .delete_by_slug(&slug)
        .await?;

    Ok(Envelope::ok("Subcategory deleted", subcategory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_accepts_camel_case() {
        let payload: SubcategoryPayload = serde_json::from_value(serde_json::json!({
            "name": "Running Shoes",
            "categoryId": 2,
            "imageUrl": "/img/running.jpg",
        }))
        .expect("deserialize");

        assert_eq!(payload.category_id, CategoryId::new(2));
        assert_eq!(payload.image_url.as_deref(), Some("/img/running.jpg"));
        assert!(payload.meta_title.is_none());
    }
}
