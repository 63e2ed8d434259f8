//! Newsletter signup handler.

use axum::{Json, extract::State};

use super::Success;
use super::form::FormFields;
use crate::db::NewsletterRepository;
use crate::error::Result;
use crate::models::NewsletterSignup;
use crate::state::AppState;

/// Sign up for the newsletter.
///
/// POST /api/newsletters
#[tracing::instrument(skip_all)]
pub async fn subscribe(State(state): State<AppState>, form: FormFields) -> Result<Json<Success>> {
    let signup = NewsletterSignup::parse(form.get("email"))?;
    let id = NewsletterRepository::new(state.pool()).create(&signup).await?;

    tracing::info!(newsletter_id = %id, domain = signup.email.domain(), "Newsletter signup");
    Ok(Json(Success::ok()))
}
