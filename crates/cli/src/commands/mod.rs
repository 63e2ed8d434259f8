//! Command implementations.

pub mod admin;
pub mod assets;
pub mod migrate;

use shop_api::config::{ApiConfig, ConfigError};
use shop_api::services::{AccountError, CatalogError};
use sqlx::PgPool;
use thiserror::Error;

/// Errors any command can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{0}")]
    Account(#[from] AccountError),

    #[error("Asset sweep failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// Load configuration and open a pool against the shop database.
async fn connect() -> Result<(ApiConfig, PgPool), CommandError> {
    let config = ApiConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = shop_api::db::create_pool(&config.database_url).await?;
    Ok((config, pool))
}
