//! Checkout: validate, price, record the order, empty the cart.
//!
//! Checkout is create-then-clear. A cart change that lands between reading the
//! cart and clearing it is lost from the cart but not added to the order.

use microshop_core::{CardSummary, Price, UserId};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::store::{CartStore, NewOrder, Order, OrderItem, OrderStore, ShippingInfo, StoreError};

/// Sales tax applied to every order, in percent.
pub const TAX_RATE_PERCENT: u32 = 8;

/// Errors that can occur during checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Shipping information is required")]
    MissingShipping,

    #[error("Payment information is required")]
    MissingPayment,

    #[error("Cannot create order with empty cart")]
    EmptyCart,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Card details as submitted by the shopper.
///
/// The card number and CVV are secrets: they are redacted from `Debug` output
/// and dropped once the card has been masked.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub card_number: Option<SecretString>,
    pub card_name: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<SecretString>,
}

impl PaymentInfo {
    /// Mask the card, or `None` if any field is missing or blank.
    fn to_summary(&self) -> Option<CardSummary> {
        let card_number = self.card_number.as_ref().map(ExposeSecret::expose_secret)?;
        let cvv = self.cvv.as_ref().map(ExposeSecret::expose_secret)?;
        let card_name = self.card_name.as_deref()?;
        let expiry_date = self.expiry_date.as_deref()?;

        if [card_number, cvv, card_name, expiry_date]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return None;
        }

        Some(CardSummary::mask(card_number, card_name, expiry_date))
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_info: Option<ShippingInfo>,
    pub payment_info: Option<PaymentInfo>,
}

/// Place an order for everything in the shopper's cart.
///
/// Subtotal is the sum of line totals, tax is [`TAX_RATE_PERCENT`] of the
/// subtotal rounded to cents, and the cart is cleared once the order exists.
///
/// # Errors
///
/// Returns `CheckoutError` if shipping or payment details are incomplete or
/// the cart is empty.
#[instrument(skip(carts, orders, request), fields(user_id = %user))]
pub async fn place_order(
    carts: &CartStore,
    orders: &OrderStore,
    user: &UserId,
    request: CheckoutRequest,
) -> Result<Order, CheckoutError> {
    let shipping_info = request
        .shipping_info
        .filter(|s| s.missing_fields().is_empty())
        .ok_or(CheckoutError::MissingShipping)?;

    let payment = request
        .payment_info
        .as_ref()
        .and_then(PaymentInfo::to_summary)
        .ok_or(CheckoutError::MissingPayment)?;

    let lines = carts.get(user).await;
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal: Price = lines.iter().map(|line| line.line_total()).sum();
    let tax = subtotal.percent(TAX_RATE_PERCENT);

    let order = orders
        .create(
            user,
            NewOrder {
                items: lines.into_iter().map(OrderItem::from).collect(),
                shipping_info,
                payment,
                subtotal,
                tax,
                total: subtotal + tax,
            },
        )
        .await?;

    carts.clear(user).await;

    tracing::info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(order)
}
