//! Order route handlers.

use axum::extract::{Path, State};
use microshop_core::{OrderId, OrderStatus};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireUser;
use crate::response::{ApiResponse, Created};
use crate::services::{CheckoutRequest, place_order};
use crate::state::AppState;
use crate::store::Order;

/// Body of `PUT /api/orders/{orderId}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

fn order_not_found() -> AppError {
    AppError::NotFound("Order not found".to_string())
}

/// Check out the shopper's cart.
#[instrument(skip(state, user, request))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> Result<Created<Order>> {
    let order = place_order(state.carts(), state.orders(), &user, request).await?;
    Ok(Created(order))
}

/// The shopper's orders, newest first.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResponse<Vec<Order>> {
    ApiResponse::ok(state.orders().list(&user).await)
}

/// One of the shopper's orders.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<String>,
) -> Result<ApiResponse<Order>> {
    state
        .orders()
        .get_by_id(&user, &OrderId::from(order_id))
        .await
        .map(ApiResponse::ok)
        .ok_or_else(order_not_found)
}

/// Move an order to another status.
#[instrument(skip(state, user))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(order_id): Path<String>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<ApiResponse<Order>> {
    let status = request
        .status
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("Order status is required".to_string()))?
        .parse::<OrderStatus>()
        .map_err(AppError::BadRequest)?;

    let order = state
        .orders()
        .update_status(&user, &OrderId::from(order_id), status)
        .await
        .ok_or_else(order_not_found)?;

    tracing::info!(order_id = %order.id, %status, "Order status updated");
    Ok(ApiResponse::with_message(order, "Order status updated"))
}
