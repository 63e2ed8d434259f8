//! Contact message handler.

use axum::{Json, extract::State};

use super::Success;
use super::form::FormFields;
use crate::db::MessageRepository;
use crate::error::Result;
use crate::models::NewMessage;
use crate::state::AppState;

/// Submit a contact message.
///
/// POST /api/messages
#[tracing::instrument(skip_all)]
pub async fn create(State(state): State<AppState>, form: FormFields) -> Result<Json<Success>> {
    let message = NewMessage::parse(
        form.get("name"),
        form.get("email"),
        form.get("phone"),
        form.get("message"),
    )?;
    let id = MessageRepository::new(state.pool()).create(&message).await?;

    tracing::info!(message_id = %id, "Contact message received");
    Ok(Json(Success::ok()))
}
