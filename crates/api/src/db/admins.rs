//! Admin repository for database operations.

use async_trait::async_trait;
use sqlx::PgPool;

use shop_core::{AdminId, Email};

use super::{AdminStore, RepositoryError, conflict_on_unique};
use crate::models::Admin;

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    admin_id: AdminId,
    name: String,
    email: String,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            admin_id: row.admin_id,
            name: row.name,
            email,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AdminWithPasswordRow {
    admin_id: AdminId,
    name: String,
    email: String,
    password: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for admin database operations.
#[derive(Debug, Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new admin repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get an admin by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            "SELECT admin_id, name, email FROM admins WHERE admin_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get an admin and their password hash by email, for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_with_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Admin, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminWithPasswordRow>(
            "SELECT admin_id, name, email, password FROM admins WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| {
            let admin = Admin::try_from(AdminRow {
                admin_id: row.admin_id,
                name: row.name,
                email: row.email,
            })?;
            Ok((admin, row.password))
        })
        .transpose()
    }

    /// Create a new admin.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already registered.
    /// Returns `RepositoryError::Database` if the insert fails otherwise.
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<Admin, RepositoryError> {
        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING admin_id, name, email
            ",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "admin with this email"))?;

        row.try_into()
    }
}

#[async_trait]
impl AdminStore for AdminRepository {
    async fn find_admin(&self, id: AdminId) -> Result<Option<Admin>, RepositoryError> {
        self.get_by_id(id).await
    }
}
