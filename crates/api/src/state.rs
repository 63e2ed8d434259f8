//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::{AdminRepository, AdminStore, ProductRepository, ProductStore};
use crate::services::{AccountService, AdminAuthGate, AssetStore, ProductCatalog};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    gate: AdminAuthGate,
    catalog: ProductCatalog,
}

impl AppState {
    /// Create application state backed by `PostgreSQL`.
    #[must_use]
    pub fn new(config: ApiConfig, pool: PgPool) -> Self {
        let admins = Arc::new(AdminRepository::new(pool.clone()));
        let products = Arc::new(ProductRepository::new(pool.clone()));
        Self::with_stores(config, pool, admins, products)
    }

    /// Create application state with explicit admin and product stores.
    ///
    /// The pool still backs the storefront inbox tables, accounts, and the
    /// readiness check.
    #[must_use]
    pub fn with_stores(
        config: ApiConfig,
        pool: PgPool,
        admins: Arc<dyn AdminStore>,
        products: Arc<dyn ProductStore>,
    ) -> Self {
        let gate = AdminAuthGate::new(admins);
        let catalog = ProductCatalog::new(products, AssetStore::new(&config.assets));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                gate,
                catalog,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get the admin gate.
    #[must_use]
    pub fn gate(&self) -> &AdminAuthGate {
        &self.inner.gate
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get an account service over the pool.
    #[must_use]
    pub fn accounts(&self) -> AccountService {
        AccountService::new(&self.inner.pool)
    }
}
