//! Review repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use shop_core::{ReviewId, Stars};

use super::RepositoryError;
use crate::models::{NewReview, Review};

#[derive(Debug, sqlx::FromRow)]
struct ReviewRow {
    review_id: ReviewId,
    name: String,
    stars: Stars,
    review: String,
    created_at: DateTime<Utc>,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Self {
            review_id: row.review_id,
            name: row.name,
            stars: row.stars,
            review: row.review,
            created_at: row.created_at,
        }
    }
}

/// Repository for the `reviews` table.
pub struct ReviewRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_recent(&self) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            r"
            SELECT review_id, name, stars, review, created_at
            FROM reviews
            ORDER BY created_at DESC, review_id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Review::from).collect())
    }

    /// Insert a review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, review: &NewReview) -> Result<ReviewId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ReviewId>(
            "INSERT INTO reviews (name, stars, review) VALUES ($1, $2, $3) RETURNING review_id",
        )
        .bind(&review.name)
        .bind(review.stars)
        .bind(&review.review)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
