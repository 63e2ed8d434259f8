//! Contact message repository.

use sqlx::PgPool;

use shop_core::MessageId;

use super::RepositoryError;
use crate::models::NewMessage;

/// Repository for the `messages` table.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a contact form submission.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, message: &NewMessage) -> Result<MessageId, RepositoryError> {
        let id = sqlx::query_scalar::<_, MessageId>(
            r"
            INSERT INTO messages (name, email, phone, message)
            VALUES ($1, $2, $3, $4)
            RETURNING message_id
            ",
        )
        .bind(&message.name)
        .bind(&message.email)
        .bind(message.phone.as_deref())
        .bind(&message.message)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
