//! Newsletter signup repository.

use sqlx::PgPool;

use shop_core::NewsletterId;

use super::RepositoryError;
use crate::models::NewsletterSignup;

/// Repository for the `newsletters` table.
pub struct NewsletterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsletterRepository<'a> {
    /// Create a new newsletter repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a signup. Repeat signups for the same address are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, signup: &NewsletterSignup) -> Result<NewsletterId, RepositoryError> {
        let id = sqlx::query_scalar::<_, NewsletterId>(
            "INSERT INTO newsletters (email) VALUES ($1) RETURNING newsletter_id",
        )
        .bind(&signup.email)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
