//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Server-side failures are
//! captured to Sentry and logged in full, but clients only ever see an
//! opaque message. Bodies are JSON: `{"error": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;
use crate::services::{AccountError, AuthenticationError, CatalogError};

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Admin gate rejected the request (or could not decide).
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Client input was unacceptable.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Product catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Registration or login failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// A path named a resource that cannot exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Authentication(err) => match err {
                AuthenticationError::MissingCredential | AuthenticationError::Unauthorized => {
                    StatusCode::FORBIDDEN
                }
                AuthenticationError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Catalog(err) => match err {
                CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
                CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
                CatalogError::Repository(_) | CatalogError::Asset(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Account(err) => match err {
                AccountError::Validation(_) | AccountError::WeakPassword(_) => {
                    StatusCode::BAD_REQUEST
                }
                AccountError::EmailTaken => StatusCode::CONFLICT,
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::Repository(_) | AccountError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the client.
    fn public_message(&self) -> String {
        if self.status().is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Authentication(err) => err.to_string(),
            Self::Validation(err) => err.to_string(),
            Self::Catalog(err) => err.to_string(),
            Self::Account(err) => err.to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Database(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an admin ID.
///
/// Called once the admin gate accepts a request, so errors raised by the
/// mutation are associated with the admin who made it.
pub fn set_sentry_user(admin_id: &impl ToString) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use shop_core::ProductId;

    use super::*;
    use crate::services::AssetError;

    fn get_status(err: AppError) -> StatusCode {
        let response = err.into_response();
        response.status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("product 12".to_string());
        assert_eq!(err.to_string(), "Not found: product 12");
        assert_eq!(err.public_message(), "product 12 not found");
    }

    #[test]
    fn test_authentication_status_codes() {
        assert_eq!(
            get_status(AuthenticationError::MissingCredential.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AuthenticationError::Unauthorized.into()),
            StatusCode::FORBIDDEN
        );
        let lookup = AuthenticationError::Lookup(RepositoryError::Database(
            sqlx::Error::PoolTimedOut,
        ));
        assert_eq!(
            get_status(lookup.into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_catalog_status_codes() {
        assert_eq!(
            get_status(CatalogError::Validation(ValidationError::MissingImage).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(CatalogError::NotFound(ProductId::new(4)).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(CatalogError::Asset(AssetError::NotFound("x".to_string())).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_account_status_codes() {
        assert_eq!(get_status(AccountError::EmailTaken.into()), StatusCode::CONFLICT);
        assert_eq!(
            get_status(AccountError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AccountError::WeakPassword("short".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "admins.email = 'oops'".to_string(),
        ));
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::Catalog(CatalogError::Repository(RepositoryError::Database(
            sqlx::Error::PoolTimedOut,
        )));
        assert_eq!(err.public_message(), "Internal server error");
    }
}
