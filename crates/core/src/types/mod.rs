//! Core types for Microshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod payment;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use category::{MainCategory, UnknownCategory};
pub use id::*;
pub use payment::CardSummary;
pub use price::Price;
pub use product::Product;
pub use status::OrderStatus;
pub use user::{UserId, UserIdError};
