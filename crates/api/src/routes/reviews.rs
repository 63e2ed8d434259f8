//! Customer review handlers.

use axum::{Json, extract::State};

use super::Success;
use super::form::FormFields;
use crate::db::ReviewRepository;
use crate::error::Result;
use crate::models::{NewReview, Review};
use crate::state::AppState;

/// List reviews, newest first.
///
/// GET /api/reviews
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Review>>> {
    let reviews = ReviewRepository::new(state.pool()).list_recent().await?;
    Ok(Json(reviews))
}

/// Submit a review.
///
/// POST /api/reviews
#[tracing::instrument(skip_all)]
pub async fn create(State(state): State<AppState>, form: FormFields) -> Result<Json<Success>> {
    let review = NewReview::parse(form.get("name"), form.get("stars"), form.get("review"))?;
    let id = ReviewRepository::new(state.pool()).create(&review).await?;

    tracing::info!(review_id = %id, stars = review.stars.get(), "Review submitted");
    Ok(Json(Success::ok()))
}
