//! Order request repository.

use sqlx::PgPool;

use shop_core::OrderId;

use super::RepositoryError;
use crate::models::NewOrder;

/// Repository for the `orders` table.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record an order request.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let id = sqlx::query_scalar::<_, OrderId>(
            "INSERT INTO orders (product_id, quantity) VALUES ($1, $2) RETURNING order_id",
        )
        .bind(order.product_id)
        .bind(order.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
