//! In-memory stores for per-shopper state.
//!
//! # Stores
//!
//! - [`interest`] - Product view counters feeding navigation personalization
//! - [`cart`] - Shopping cart lines
//! - [`orders`] - Placed orders
//!
//! All stores are keyed by [`UserId`](microshop_core::UserId) and live only as
//! long as the process. Each store guards its map with a single
//! `tokio::sync::RwLock`, so every operation is atomic on its own; nothing
//! spans more than one store.

pub mod cart;
pub mod interest;
pub mod orders;

use microshop_core::ProductId;
use thiserror::Error;

pub use cart::{CartItem, CartStore};
pub use interest::{AggregatedInterests, InterestTracker, UserInterest};
pub use orders::{NewOrder, Order, OrderItem, OrderStore, ShippingInfo};

/// Errors returned by store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The product does not exist in the catalog.
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    /// The product is not in the shopper's cart.
    #[error("Product with id {0} not found in cart")]
    ItemNotInCart(ProductId),

    /// An order was submitted without items.
    #[error("Order must contain at least one item")]
    EmptyOrder,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
