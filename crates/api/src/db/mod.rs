//! Database operations for the shop `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `admins` - Admin accounts (password stored as Argon2id hash)
//! - `products` - Catalog rows, each referencing an uploaded image asset
//! - `messages` - Contact form submissions
//! - `reviews` - Customer reviews
//! - `newsletters` - Newsletter signups
//! - `orders` - Order requests
//!
//! # Storage capabilities
//!
//! The admin gate and the product catalog do not hold a pool directly. They
//! receive an [`AdminStore`] / [`ProductStore`] at construction, implemented
//! here for `PostgreSQL` and by in-memory doubles in tests.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p shop-cli -- migrate
//! ```

pub mod admins;
#[cfg(test)]
pub mod memory;
pub mod messages;
pub mod newsletters;
pub mod orders;
pub mod products;
pub mod reviews;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shop_core::{AdminId, ProductId};

use crate::models::{Admin, Product, ProductDetails};

pub use admins::AdminRepository;
pub use messages::MessageRepository;
pub use newsletters::NewsletterRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use reviews::ReviewRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Lookup of admin records, used by the admin gate.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Find an admin by id.
    async fn find_admin(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError>;
}

/// Persistence of product rows, used by the catalog.
///
/// Every method is a single statement; callers get no isolation beyond
/// per-statement atomicity.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Insert a product referencing `image` and return its id.
    async fn insert_product(
        &self,
        details: &ProductDetails,
        image: &str,
    ) -> Result<ProductId, RepositoryError>;

    /// Overwrite a product's fields.
    ///
    /// `image = None` keeps the stored filename. Returns `false` when no row
    /// has that id; nothing is written in that case.
    async fn update_product(
        &self,
        id: ProductId,
        details: &ProductDetails,
        image: Option<&str>,
    ) -> Result<bool, RepositoryError>;

    /// Delete a product and return the image filename it referenced,
    /// or `None` if there was no such row.
    async fn delete_product(&self, id: ProductId) -> Result<Option<String>, RepositoryError>;

    /// Every image filename currently referenced by a product row.
    async fn referenced_images(&self) -> Result<Vec<String>, RepositoryError>;
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

/// Map a unique-constraint violation to [`RepositoryError::Conflict`].
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}
