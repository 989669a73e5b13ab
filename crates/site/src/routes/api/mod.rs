//! JSON API route handlers.
//!
//! Mutating endpoints respond with an envelope of `status`, `message`, and
//! `data`, matching what the admin frontend expects. Field names are
//! camelCase throughout.

pub mod auth;
pub mod products;
pub mod reviews;
pub mod social_links;
pub mod subcategories;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Standard response envelope for mutating API endpoints.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// A 200 envelope.
    pub fn ok(message: impl Into<String>, data: T) -> Response {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// A 201 envelope.
    pub fn created(message: impl Into<String>, data: T) -> Response {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Response {
        let body = Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        };
        (status, Json(body)).into_response()
    }
}

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/{slug}", get(products::show))
        .route(
            "/reviews",
            get(reviews::list)
                .post(reviews::create)
                .put(reviews::approve)
                .delete(reviews::delete),
        )
        .route("/reviews/{id}", put(reviews::update))
        .route(
            "/subcategories/{slug}",
            get(subcategories::show)
                .put(subcategories::update)
                .delete(subcategories::delete),
        )
        .route(
            "/social-links",
            get(social_links::list)
                .post(social_links::upsert)
                .delete(social_links::delete),
        )
        .route("/auth/forgot-password", post(auth::forgot_password))
        .route("/auth/reset-password", post(auth::reset_password))
}
