//! Review API handlers.
//!
//! Submission is public and always lands in `pending`; approval, editing,
//! and deletion are admin operations.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use bazaar_core::{ProductId, ReviewId, ReviewStatus};

use crate::db::products::ProductRepository;
use crate::db::reviews::{ReviewRepository, ReviewUpdate};
use crate::error::{AppError, Result};
use crate::routes::api::Envelope;
use crate::state::AppState;

/// Review listing query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub product_id: Option<ProductId>,
}

/// Review id query parameter for approve/delete.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: ReviewId,
}

/// Review submission payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewPayload {
    pub product_id: ProductId,
    pub reviewer: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Full review replacement payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewPayload {
    pub product_id: ProductId,
    pub rating: i32,
    pub comment: Option<String>,
    pub status: ReviewStatus,
}

/// Validate a 1-5 rating.
fn validate_rating(rating: i32) -> std::result::Result<(), AppError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ))
    }
}

/// List reviews with product details, optionally scoped to one product.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>> {
    let repo = ReviewRepository::new(state.pool());

    let reviews = match query.product_id {
        Some(product_id) => repo.list_for_product(product_id).await?,
        None => repo.list_all().await?,
    };

    Ok(Json(json!({ "reviews": reviews })))
}

/// Submit a new review. It stays `pending` until approved.
#[instrument(skip(state))]
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewPayload>,
) -> Result<Response> {
    validate_rating(payload.rating)?;

    let reviewer = payload.reviewer.trim();
    if reviewer.is_empty() {
        return Err(AppError::BadRequest("Reviewer name is required".to_string()));
    }

    ProductRepository::new(state.pool())
        .get_by_id(payload.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let review = ReviewRepository::new(state.pool())
        .create(
            payload.product_id,
            reviewer,
            payload.rating,
            payload.comment.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Envelope::created(
        "Review submitted and awaiting approval",
        review,
    ))
}

/// Approve a review, making it visible on the product page.
#[instrument(skip(state))]
pub async fn approve(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    let review = ReviewRepository::new(state.pool()).approve(query.id).await?;

    Ok(Envelope::ok("Review approved", review))
}

/// Overwrite a review's fields.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ReviewId>,
    Json(payload): Json<UpdateReviewPayload>,
) -> Result<Response> {
    validate_rating(payload.rating)?;

    let review = ReviewRepository::new(state.pool())
        .update(
            id,
            &ReviewUpdate {
                product_id: payload.product_id,
                rating: payload.rating,
                comment: payload.comment.unwrap_or_default(),
                status: payload.status,
            },
        )
        .await?;

    Ok(Envelope::ok("Review updated", review))
}

/// Delete a review, returning the deleted row.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Response> {
    let review = ReviewRepository::new(state.pool()).delete(query.id).await?;

    Ok(Envelope::ok("Review deleted", review))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn test_create_payload_accepts_camel_case() {
        let payload: CreateReviewPayload = serde_json::from_value(json!({
            "productId": 3,
            "reviewer": "Ana",
            "rating": 4,
        }))
        .expect("deserialize");

        assert_eq!(payload.product_id, ProductId::new(3));
        assert!(payload.comment.is_none());
    }

    #[test]
    fn test_update_payload_parses_status() {
        let payload: UpdateReviewPayload = serde_json::from_value(json!({
            "productId": 3,
            "rating": 2,
            "comment": "edited",
            "status": "active",
        }))
        .expect("deserialize");

        assert_eq!(payload.status, ReviewStatus::Active);
    }
}
