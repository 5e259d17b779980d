//! Integration tests for the Microshop API.
//!
//! The tests drive the full router in-process with `tower::ServiceExt::oneshot`,
//! so no server, port or network is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p microshop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_config` - Dashboard configuration and header personalization
//! - `api_products` - Catalog browsing and view tracking
//! - `api_cart_orders` - Cart lifecycle and checkout
//! - `api_errors` - Envelope, status codes and unmatched routes

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use microshop_api::catalog::ProductCatalog;
use microshop_api::config::ApiConfig;
use microshop_api::middleware::USER_ID_HEADER;
use microshop_api::routes;
use microshop_api::state::AppState;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;

/// An in-process API with the demo catalog and empty stores.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build the app with no `/api/config` delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ApiConfig {
            config_delay: Duration::ZERO,
            ..ApiConfig::default()
        })
    }

    /// Build the app with a custom configuration.
    #[must_use]
    pub fn with_config(config: ApiConfig) -> Self {
        let catalog = ProductCatalog::demo().expect("Demo catalog is valid");
        Self {
            router: routes::app(AppState::new(config, catalog)),
        }
    }

    /// `GET` with an optional shopper id.
    pub async fn get(&self, uri: &str, user: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, user, None).await
    }

    /// Send a request with an optional shopper id and JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let body = body.map(|b| b.to_string());
        self.send_raw(method, uri, user, body.as_deref()).await
    }

    /// Send a request whose body is sent verbatim as `application/json`.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_owned())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let text = String::from_utf8_lossy(&bytes).into_owned();

        TestResponse {
            status,
            headers,
            json: serde_json::from_str(&text).unwrap_or(Value::Null),
            text,
        }
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Body parsed as JSON, `Null` if it is not JSON.
    pub json: Value,
    /// Body as received, preserving object key order.
    pub text: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

impl TestResponse {
    /// The envelope's `data`, decoded from the raw body.
    ///
    /// Decoding from text keeps map key order, which `Value` does not.
    #[must_use]
    pub fn data<T: DeserializeOwned>(&self) -> T {
        serde_json::from_str::<Envelope<T>>(&self.text)
            .expect("Response has no decodable data")
            .data
    }

    /// The envelope's `message`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.json.get("message").and_then(Value::as_str)
    }

    /// The envelope's `success` flag.
    #[must_use]
    pub fn success(&self) -> bool {
        self.json.get("success").and_then(Value::as_bool) == Some(true)
    }
}
