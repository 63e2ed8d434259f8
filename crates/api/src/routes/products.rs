//! Product catalog route handlers.
//!
//! Reads are public. Create, update and delete require [`RequireAdmin`] and
//! take multipart bodies: text fields `name`, `price`, `discount`, and on
//! update an optional `image` (file, or text naming an existing asset).

use axum::{
    Json,
    extract::{
        Multipart, Path, State,
        multipart::{Field, MultipartRejection},
    },
};

use shop_core::ProductId;

use super::Success;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::{Product, ProductDetails, ValidationError};
use crate::services::{ImageChange, ImageUpload};
use crate::state::AppState;

/// Multipart field holding the image.
const IMAGE_FIELD: &str = "image";

/// A product form as sent by the admin UI, before validation.
#[derive(Debug, Default)]
struct ProductForm {
    name: Option<String>,
    price: Option<String>,
    discount: Option<String>,
    image_text: Option<String>,
    image_file: Option<ImageUpload>,
}

impl ProductForm {
    fn details(&self) -> std::result::Result<ProductDetails, ValidationError> {
        ProductDetails::parse(
            self.name.as_deref(),
            self.price.as_deref(),
            self.discount.as_deref(),
        )
    }

    /// Drain a multipart body. Files larger than `max_bytes` are rejected
    /// while streaming, before they are fully buffered.
    async fn read(
        multipart: std::result::Result<Multipart, MultipartRejection>,
        max_bytes: usize,
    ) -> std::result::Result<Self, ValidationError> {
        let mut multipart = multipart.map_err(|e| ValidationError::Malformed(e.body_text()))?;
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ValidationError::Malformed(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(file_name) = field.file_name().map(str::to_string) {
                if name != IMAGE_FIELD {
                    continue;
                }
                let bytes = read_file(field, max_bytes).await?;
                // Browsers send an empty, unnamed part for an untouched file input.
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                form.image_file = Some(ImageUpload {
                    original_name: file_name,
                    bytes,
                });
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| ValidationError::Malformed(e.body_text()))?;
            match name.as_str() {
                "name" => form.name = Some(text),
                "price" => form.price = Some(text),
                "discount" => form.discount = Some(text),
                IMAGE_FIELD => form.image_text = Some(text),
                _ => {}
            }
        }

        Ok(form)
    }
}

async fn read_file(
    mut field: Field<'_>,
    max_bytes: usize,
) -> std::result::Result<Vec<u8>, ValidationError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| ValidationError::Malformed(e.body_text()))?
    {
        if bytes.len() + chunk.len() > max_bytes {
            return Err(ValidationError::FileTooLarge { max: max_bytes });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// A path segment that is not a product id names no product.
fn product_id(raw: &str) -> Option<ProductId> {
    raw.parse().ok()
}

/// List all products.
///
/// GET /api/products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog().list().await?))
}

/// Create a product with its image.
///
/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Success>> {
    let catalog = state.catalog();
    let form = ProductForm::read(multipart, catalog.assets().max_bytes()).await?;
    let details = form.details()?;

    catalog.create(&admin, details, form.image_file).await?;
    Ok(Json(Success::ok()))
}

/// Update a product.
///
/// PUT /api/products/{id}
///
/// Without a new file, a non-empty `image` text field replaces the stored
/// filename verbatim; with neither, the image is left as is. An id that
/// cannot name a product is a successful no-op, like any id with no row.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<Success>> {
    let catalog = state.catalog();
    let form = ProductForm::read(multipart, catalog.assets().max_bytes()).await?;
    let details = form.details()?;

    // No row can match, so nothing changes and nothing is stored.
    let Some(id) = product_id(&raw_id) else {
        tracing::debug!(id = %raw_id, "Update names no product");
        return Ok(Json(Success::ok()));
    };

    let image = match (form.image_file, form.image_text) {
        (Some(upload), _) => ImageChange::Upload(upload),
        (None, Some(text)) if !text.trim().is_empty() => ImageChange::Name(text),
        (None, _) => ImageChange::Keep,
    };

    catalog.update(&admin, id, details, image).await?;
    Ok(Json(Success::ok()))
}

/// Delete a product and its image.
///
/// DELETE /api/products/{id}
///
/// An id that cannot name a product is 404, like any id with no row.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(raw_id): Path<String>,
) -> Result<Json<Success>> {
    let id = product_id(&raw_id)
        .ok_or_else(|| AppError::NotFound(format!("product {raw_id}")))?;
    state.catalog().delete(&admin, id).await?;
    Ok(Json(Success::ok()))
}
