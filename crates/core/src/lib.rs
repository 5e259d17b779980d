//! Microshop Core - Shared domain types.
//!
//! This crate provides the types shared by the Microshop components:
//! - `api` - The storefront HTTP JSON API consumed by the shell and micro-frontends
//! - `integration-tests` - Black-box tests against the API router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no stores, no HTTP.
//! Everything here is cheap to construct and safe to share across threads.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, user identity, categories, products, prices,
//!   order statuses and masked payment cards

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
