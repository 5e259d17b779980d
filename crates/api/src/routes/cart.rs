//! Cart route handlers.
//!
//! All cart routes are scoped to the shopper named by the `userid` header.

use axum::extract::{Path, State};
use microshop_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::CartItem;

/// Body of `POST /api/cart`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<ProductId>,
    pub quantity: Option<i64>,
}

/// Body of `PUT /api/cart/{productId}`.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: Option<i64>,
}

/// Response of `GET /api/cart/{productId}/quantity`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuantity {
    pub product_id: ProductId,
    pub quantity: u32,
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a product id path segment.
fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid product ID".to_string()))
}

/// Clamp a positive request quantity into a line quantity.
fn line_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity).unwrap_or(u32::MAX)
}

// =============================================================================
// Handlers
// =============================================================================

/// The shopper's cart lines.
#[instrument(skip(state, user))]
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResponse<Vec<CartItem>> {
    ApiResponse::ok(state.carts().get(&user).await)
}

/// Add a product; quantities accumulate on an existing line.
#[instrument(skip(state, user))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ApiJson(request): ApiJson<AddToCartRequest>,
) -> Result<ApiResponse<CartItem>> {
    let (Some(product_id), Some(quantity @ 1..)) = (request.product_id, request.quantity) else {
        return Err(AppError::BadRequest(
            "Product ID and quantity are required. Quantity must be a positive number."
                .to_string(),
        ));
    };

    let line = state
        .carts()
        .add(&user, product_id, line_quantity(quantity))
        .await?;

    tracing::info!(%product_id, quantity = line.quantity, "Added to cart");
    Ok(ApiResponse::ok(line))
}

/// Set a line's quantity; zero removes the line.
#[instrument(skip(state, user))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<String>,
    ApiJson(request): ApiJson<UpdateCartRequest>,
) -> Result<ApiResponse<Option<CartItem>>> {
    let invalid = || AppError::BadRequest("Invalid product ID or quantity".to_string());
    let product_id = parse_product_id(&product_id).map_err(|_| invalid())?;
    let Some(quantity @ 0..) = request.quantity else {
        return Err(invalid());
    };

    let line = state.carts().update(&user, product_id, quantity).await?;

    let message = if quantity == 0 {
        "Item removed from cart"
    } else {
        "Cart item updated"
    };
    Ok(ApiResponse::with_message(line, message))
}

/// Remove a line. Removing an absent product succeeds.
#[instrument(skip(state, user))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<String>,
) -> Result<ApiResponse<()>> {
    let product_id = parse_product_id(&product_id)?;
    state.carts().remove(&user, product_id).await;
    Ok(ApiResponse::message("Item removed from cart"))
}

/// Empty the cart.
#[instrument(skip(state, user))]
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> ApiResponse<()> {
    state.carts().clear(&user).await;
    ApiResponse::message("Cart cleared")
}

/// Units of one product in the cart.
#[instrument(skip(state, user))]
pub async fn quantity(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(product_id): Path<String>,
) -> Result<ApiResponse<ProductQuantity>> {
    let product_id = parse_product_id(&product_id)?;
    let quantity = state.carts().get_quantity(&user, product_id).await;
    Ok(ApiResponse::ok(ProductQuantity {
        product_id,
        quantity,
    }))
}
