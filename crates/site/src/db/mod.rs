//! Database operations for the Bazaar `PostgreSQL` database.
//!
//! # Tables
//!
//! - `users` - customer accounts and password-reset tokens
//! - `reviews` - customer reviews with moderation status
//! - `products` - catalog products (prices, options, stock, SEO fields)
//! - `categories` / `subcategories` - catalog hierarchy, slug-addressed
//! - `social_links` - configured social-media links
//! - `session` - tower-sessions storage (carts live here)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/site/migrations/` and run out of band
//! via `sqlx migrate run`. They are never run on startup.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod categories;
pub mod products;
pub mod reviews;
pub mod social_links;
pub mod subcategories;
pub mod users;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The operation targeted a row that does not exist.
    #[error("record not found")]
    NotFound,

    /// A stored value could not be interpreted.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
