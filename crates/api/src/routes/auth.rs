//! Admin registration and login handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use super::Success;
use super::form::FormFields;
use crate::error::Result;
use crate::models::Admin;
use crate::state::AppState;

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: Admin,
}

/// Register a new admin.
///
/// POST /api/register
#[tracing::instrument(skip_all)]
pub async fn register(State(state): State<AppState>, form: FormFields) -> Result<Json<Success>> {
    state
        .accounts()
        .register(
            form.get("name").unwrap_or_default(),
            form.get("email").unwrap_or_default(),
            form.get("password").unwrap_or_default(),
        )
        .await?;

    Ok(Json(Success::ok()))
}

/// Check admin credentials.
///
/// POST /api/login
///
/// Returns the admin record; the client sends its `admin_id` as
/// `x-admin-id` on product mutations.
#[tracing::instrument(skip_all)]
pub async fn login(State(state): State<AppState>, form: FormFields) -> Result<Json<LoginResponse>> {
    let admin = state
        .accounts()
        .login(
            form.get("email").unwrap_or_default(),
            form.get("password").unwrap_or_default(),
        )
        .await?;

    Ok(Json(LoginResponse {
        success: true,
        admin,
    }))
}
