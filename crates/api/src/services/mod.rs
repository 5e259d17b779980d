//! Business logic that spans more than one store.
//!
//! # Services
//!
//! - `checkout` - Turn a shopper's cart into an order

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutRequest, PaymentInfo, TAX_RATE_PERCENT, place_order};
