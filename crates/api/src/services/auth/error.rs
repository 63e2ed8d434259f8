//! Account error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Errors that can occur during admin registration and login.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Missing name, malformed email, or similar.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Password too short.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Another admin already uses this email.
    #[error("an admin with this email already exists")]
    EmailTaken,

    /// Unknown email or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
