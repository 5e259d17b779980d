//! Microshop API library.
//!
//! This crate provides the storefront API as a library, allowing the router
//! to be driven in-process by tests and reused by other binaries.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod navigation;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
