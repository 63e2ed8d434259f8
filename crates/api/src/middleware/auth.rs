//! Admin extractor for product-mutating routes.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::{AppError, set_sentry_user};
use crate::services::{AdminContext, AuthenticationError};
use crate::state::AppState;

/// Header carrying the claimed admin id.
pub const ADMIN_ID_HEADER: &str = "x-admin-id";

/// Extractor that requires a verified admin.
///
/// Reads [`ADMIN_ID_HEADER`] and runs it through the admin gate. Being a
/// parts extractor it runs before any body extractor, so a rejected request
/// never has its upload read or stored.
///
/// # Example
///
/// ```rust,ignore
/// async fn delete_product(
///     RequireAdmin(admin): RequireAdmin,
///     Path(id): Path<ProductId>,
/// ) -> Result<Json<Success>, AppError> {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin(pub AdminContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A header that is present but not text cannot name an admin.
        let claimed = match parts.headers.get(ADMIN_ID_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AuthenticationError::Unauthorized)?,
            ),
            None => None,
        };

        let admin = state.gate().verify(claimed).await?;
        set_sentry_user(&admin.admin_id);
        tracing::Span::current().record("admin_id", admin.admin_id.as_i32());

        Ok(Self(admin))
    }
}
