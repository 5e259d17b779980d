//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Liveness check
//!
//! # Shell configuration
//! GET    /api/config                          - Dashboard menus, personalized by `userid`
//!
//! # Products
//! GET    /api/products                        - All products
//! GET    /api/products/{category}             - Products of a main category
//! GET    /api/products/{category}/{segment}   - Product by id, or sub-category listing
//!
//! # Interests (requires `userid`)
//! GET    /api/interests                       - Raw and aggregated view counters
//! DELETE /api/interests                       - Forget the shopper's views
//!
//! # Cart (requires `userid`)
//! GET    /api/cart                            - Cart lines
//! POST   /api/cart                            - Add a product
//! DELETE /api/cart                            - Empty the cart
//! PUT    /api/cart/{productId}                - Set a line's quantity
//! DELETE /api/cart/{productId}                - Remove a line
//! GET    /api/cart/{productId}/quantity       - Units of a product in the cart
//!
//! # Orders (requires `userid`)
//! POST   /api/orders                          - Check out the cart
//! GET    /api/orders                          - Order history
//! GET    /api/orders/{orderId}                - One order
//! PUT    /api/orders/{orderId}/status         - Change an order's status
//! ```

pub mod cart;
pub mod config;
pub mod interests;
pub mod orders;
pub mod products;

use axum::{
    Json, Router,
    http::{HeaderValue, Request, Response},
    middleware::from_fn,
    routing::{get, put},
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{request_id_middleware, user_context_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{category}", get(products::by_category))
        .route("/{category}/{segment}", get(products::by_segment))
}

/// Create the interest routes router.
pub fn interest_routes() -> Router<AppState> {
    Router::new().route("/", get(interests::show).delete(interests::clear))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).post(cart::add).delete(cart::clear))
        .route("/{product_id}", put(cart::update).delete(cart::remove))
        .route("/{product_id}/quantity", get(cart::quantity))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{order_id}", get(orders::show))
        .route("/{order_id}/status", put(orders::update_status))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(config::show))
        .nest("/products", product_routes())
        .nest("/interests", interest_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
}

/// Build the complete application: routes, fallback and middleware.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config().cors_origins);

    Router::new()
        .route("/health", get(health))
        .nest("/api", routes())
        .fallback(not_found)
        .layer(from_fn(user_context_middleware))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors)
        .with_state(state)
}

/// CORS for the shell and micro-frontends.
///
/// An empty origin list allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
}

/// Liveness health check endpoint.
///
/// Returns ok if the server is running. Does not check dependencies.
async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        message: "Server is running",
    })
}

/// Envelope 404 for unmatched routes.
async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
