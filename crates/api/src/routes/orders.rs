//! Order request handler.

use axum::{Json, extract::State};

use super::Success;
use super::form::FormFields;
use crate::db::OrderRepository;
use crate::error::Result;
use crate::models::NewOrder;
use crate::state::AppState;

/// Record an order request.
///
/// POST /api/orders
#[tracing::instrument(skip_all)]
pub async fn create(State(state): State<AppState>, form: FormFields) -> Result<Json<Success>> {
    let order = NewOrder::parse(form.get("product_id"), form.get("quantity"))?;
    let id = OrderRepository::new(state.pool()).create(&order).await?;

    tracing::info!(
        order_id = %id,
        product_id = %order.product_id,
        quantity = order.quantity,
        "Order received"
    );
    Ok(Json(Success::ok()))
}
