//! Product lifecycle across the product table and the asset store.
//!
//! The two stores share no transaction. Writes are ordered so the database
//! row is the commit point:
//!
//! - create/update write the asset first, then the row. If the row write
//!   fails (or, on update, matches no row) the fresh asset is removed again.
//! - delete removes the row first, then tries to remove the asset. A failed
//!   asset removal is logged and otherwise ignored.
//!
//! Replacing a product's image leaves the previous file on disk; orphans are
//! collected out of band by [`ProductCatalog::sweep_orphan_assets`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use shop_core::ProductId;

use super::assets::{AssetError, AssetStore};
use super::gate::AdminContext;
use crate::db::{ProductStore, RepositoryError};
use crate::models::{Product, ProductDetails, ValidationError};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("product storage failed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("asset storage failed: {0}")]
    Asset(#[from] AssetError),
}

/// An uploaded image file as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Filename the client sent, unsanitized.
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Requested image for an update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageChange {
    /// Keep whatever the row references now.
    #[default]
    Keep,
    /// Reference this filename, taken as given.
    Name(String),
    /// Store a new file and reference it.
    Upload(ImageUpload),
}

/// Outcome of an orphan sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Asset files examined.
    pub scanned: usize,
    /// Unreferenced assets old enough to remove.
    pub orphans: Vec<String>,
    /// Orphans actually removed (zero on a dry run).
    pub removed: usize,
    /// Orphans whose removal failed.
    pub failed: usize,
}

/// Owns product records and their image assets.
#[derive(Clone)]
pub struct ProductCatalog {
    products: Arc<dyn ProductStore>,
    assets: AssetStore,
}

impl ProductCatalog {
    #[must_use]
    pub fn new(products: Arc<dyn ProductStore>, assets: AssetStore) -> Self {
        Self { products, assets }
    }

    /// The asset store backing product images.
    #[must_use]
    pub const fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// All products, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list_products().await?)
    }

    /// Create a product with its image.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingImage` (nothing written) if `image`
    /// is `None`, a validation error for an empty or oversized file, or a
    /// storage error.
    #[tracing::instrument(skip_all, fields(admin_id = %admin.admin_id, name = %details.name))]
    pub async fn create(
        &self,
        admin: &AdminContext,
        details: ProductDetails,
        image: Option<ImageUpload>,
    ) -> Result<ProductId, CatalogError> {
        let image = image.ok_or(ValidationError::MissingImage)?;
        let stored = self.store_upload(&image).await?;

        match self.products.insert_product(&details, &stored).await {
            Ok(product_id) => {
                tracing::info!(product_id = %product_id, image = %stored, "Product created");
                Ok(product_id)
            }
            Err(e) => {
                self.discard_asset(&stored).await;
                Err(e.into())
            }
        }
    }

    /// Overwrite a product's fields and optionally its image.
    ///
    /// Updating an id with no row succeeds without writing anything.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or oversized file, or a
    /// storage error.
    #[tracing::instrument(skip_all, fields(admin_id = %admin.admin_id, product_id = %id))]
    pub async fn update(
        &self,
        admin: &AdminContext,
        id: ProductId,
        details: ProductDetails,
        image: ImageChange,
    ) -> Result<(), CatalogError> {
        let (image, fresh) = match image {
            ImageChange::Keep => (None, false),
            ImageChange::Name(name) => (Some(name), false),
            ImageChange::Upload(upload) => (Some(self.store_upload(&upload).await?), true),
        };

        let updated = self
            .products
            .update_product(id, &details, image.as_deref())
            .await;

        match (updated, image) {
            (Ok(true), _) => {
                tracing::info!("Product updated");
                Ok(())
            }
            (Ok(false), image) => {
                tracing::info!("Update matched no product");
                if let (true, Some(stored)) = (fresh, image) {
                    self.discard_asset(&stored).await;
                }
                Ok(())
            }
            (Err(e), image) => {
                if let (true, Some(stored)) = (fresh, image) {
                    self.discard_asset(&stored).await;
                }
                Err(e.into())
            }
        }
    }

    /// Delete a product, then attempt to remove its image.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` (nothing touched) if no row has `id`,
    /// or a storage error if the row removal fails.
    #[tracing::instrument(skip_all, fields(admin_id = %admin.admin_id, product_id = %id))]
    pub async fn delete(&self, admin: &AdminContext, id: ProductId) -> Result<(), CatalogError> {
        let image = self
            .products
            .delete_product(id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        tracing::info!(image = %image, "Product deleted");
        if let Err(e) = self.assets.delete(&image).await {
            tracing::warn!(image = %image, error = %e, "Failed to delete product image");
        }
        Ok(())
    }

    /// Find asset files no product references and, unless `dry_run`,
    /// remove them.
    ///
    /// Only generated names (`<unixMillis>-...`) at least `min_age` old are
    /// candidates, so an upload whose row is still being written is left alone.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the references or the asset listing
    /// cannot be read. Individual removal failures are counted, not returned.
    pub async fn sweep_orphan_assets(
        &self,
        min_age: Duration,
        dry_run: bool,
    ) -> Result<SweepReport, CatalogError> {
        let referenced: HashSet<String> =
            self.products.referenced_images().await?.into_iter().collect();
        let files = self.assets.list().await?;
        let min_age = u64::try_from(min_age.as_millis()).unwrap_or(u64::MAX);
        let cutoff = now_millis().saturating_sub(min_age);

        let mut report = SweepReport {
            scanned: files.len(),
            ..SweepReport::default()
        };
        report.orphans = files
            .into_iter()
            .filter(|name| !referenced.contains(name))
            .filter(|name| stored_at_millis(name).is_some_and(|at| at <= cutoff))
            .collect();

        if dry_run {
            return Ok(report);
        }
        for name in &report.orphans {
            match self.assets.delete(name).await {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    tracing::warn!(name = %name, error = %e, "Failed to remove orphan asset");
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }

    async fn store_upload(&self, upload: &ImageUpload) -> Result<String, CatalogError> {
        if upload.bytes.is_empty() {
            return Err(ValidationError::EmptyFile.into());
        }
        if upload.bytes.len() > self.assets.max_bytes() {
            return Err(ValidationError::FileTooLarge {
                max: self.assets.max_bytes(),
            }
            .into());
        }
        Ok(self.assets.store(&upload.bytes, &upload.original_name).await?)
    }

    /// Remove an asset that was written for a request whose row write did not happen.
    async fn discard_asset(&self, name: &str) {
        match self.assets.delete(name).await {
            Ok(()) => tracing::debug!(image = %name, "Discarded unreferenced upload"),
            Err(e) => {
                tracing::warn!(image = %name, error = %e, "Failed to discard unreferenced upload");
            }
        }
    }
}

impl std::fmt::Debug for ProductCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductCatalog")
            .field("assets", &self.assets)
            .finish_non_exhaustive()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// The timestamp prefix of a generated asset name.
fn stored_at_millis(name: &str) -> Option<u64> {
    let (millis, rest) = name.split_once('-')?;
    if rest.is_empty() || millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    millis.parse().ok()
}
