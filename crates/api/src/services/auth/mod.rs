//! Admin account service.
//!
//! Registration stores an Argon2id hash; login checks a password against it
//! and returns the admin. Login is stateless: nothing is issued, and product
//! mutations identify the admin by id (see [`crate::services::gate`]).

mod error;

pub use error::AccountError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use shop_core::Email;

use crate::db::{AdminRepository, RepositoryError};
use crate::models::{Admin, ValidationError};

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Admin registration and login.
pub struct AccountService {
    admins: AdminRepository,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub fn new(pool: &PgPool) -> Self {
        Self {
            admins: AdminRepository::new(pool.clone()),
        }
    }

    /// Register a new admin.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Validation` for a blank name or invalid email.
    /// Returns `AccountError::WeakPassword` if the password is too short.
    /// Returns `AccountError::EmailTaken` if the email is already registered.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Admin, AccountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        let email = Email::parse(email).map_err(|e| ValidationError::invalid("email", e))?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let admin = self
            .admins
            .create(name, &email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AccountError::EmailTaken,
                other => AccountError::Repository(other),
            })?;

        tracing::info!(admin_id = %admin.admin_id, "Admin registered");
        Ok(admin)
    }

    /// Check an email and password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` if the email is unknown or
    /// malformed, or the password does not match.
    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Admin, AccountError> {
        let email = Email::parse(email).map_err(|_| AccountError::InvalidCredentials)?;

        let (admin, password_hash) = self
            .admins
            .get_with_password_hash(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        tracing::info!(admin_id = %admin.admin_id, "Admin logged in");
        Ok(admin)
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AccountError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AccountError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AccountError::InvalidCredentials)
}
