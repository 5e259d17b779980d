//! Integration tests for the cart lifecycle and checkout.

use axum::http::Method;
use microshop_core::OrderStatus;
use microshop_integration_tests::{TestApp, TestResponse};
use serde_json::{Value, json};

async fn add(app: &TestApp, user: &str, product_id: i64, quantity: i64) -> TestResponse {
    app.send(
        Method::POST,
        "/api/cart",
        Some(user),
        Some(json!({ "productId": product_id, "quantity": quantity })),
    )
    .await
}

fn checkout_body() -> Value {
    json!({
        "shippingInfo": {
            "fullName": "Jane Doe",
            "address": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "zipCode": "62701",
            "country": "USA"
        },
        "paymentInfo": {
            "cardNumber": "4111 1111 1111 1234",
            "cardName": "Jane Doe",
            "expiryDate": "12/29",
            "cvv": "123"
        }
    })
}

async fn checkout(app: &TestApp, user: &str, body: Value) -> TestResponse {
    app.send(Method::POST, "/api/orders", Some(user), Some(body))
        .await
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_cart_requires_user() {
    let app = TestApp::new();

    for (method, uri) in [
        (Method::GET, "/api/cart"),
        (Method::DELETE, "/api/cart"),
        (Method::DELETE, "/api/cart/1"),
        (Method::GET, "/api/cart/1/quantity"),
        (Method::GET, "/api/orders"),
    ] {
        let resp = app.send(method, uri, None, None).await;
        assert_eq!(resp.status, 401, "{uri}");
        assert_eq!(resp.message(), Some("User ID is required"));
    }

    let resp = app.get("/api/cart", Some("   ")).await;
    assert_eq!(resp.status, 401);
}

#[tokio::test]
async fn test_add_accumulates_quantity() {
    let app = TestApp::new();

    assert_eq!(add(&app, "alice", 1, 2).await.status, 200);
    let resp = add(&app, "alice", 1, 3).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json["data"]["quantity"], 5);

    let resp = app.get("/api/cart/1/quantity", Some("alice")).await;
    assert_eq!(resp.json["data"], json!({ "productId": 1, "quantity": 5 }));

    let cart = app.get("/api/cart", Some("alice")).await;
    assert_eq!(cart.json["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(cart.json["data"][0]["product"]["name"], "Classic White T-Shirt");
}

#[tokio::test]
async fn test_add_validates_input() {
    let app = TestApp::new();

    assert_eq!(add(&app, "alice", 1, 0).await.status, 400);
    assert_eq!(add(&app, "alice", 1, -2).await.status, 400);

    let resp = app
        .send(Method::POST, "/api/cart", Some("alice"), Some(json!({ "quantity": 1 })))
        .await;
    assert_eq!(resp.status, 400);

    let resp = add(&app, "alice", 999, 1).await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.message(), Some("Product with id 999 not found"));
}

#[tokio::test]
async fn test_malformed_body_keeps_envelope() {
    let app = TestApp::new();
    let resp = app
        .send_raw(Method::POST, "/api/cart", Some("alice"), Some("{not json"))
        .await;

    assert_eq!(resp.status, 400);
    assert_eq!(resp.json["success"], false);
    assert!(resp.message().is_some());
}

#[tokio::test]
async fn test_update_and_remove() {
    let app = TestApp::new();
    add(&app, "alice", 101, 1).await;

    let resp = app
        .send(Method::PUT, "/api/cart/101", Some("alice"), Some(json!({ "quantity": 4 })))
        .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.message(), Some("Cart item updated"));
    assert_eq!(resp.json["data"]["quantity"], 4);

    let resp = app
        .send(Method::PUT, "/api/cart/101", Some("alice"), Some(json!({ "quantity": 0 })))
        .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.message(), Some("Item removed from cart"));
    assert_eq!(resp.json["data"], Value::Null);

    let cart = app.get("/api/cart", Some("alice")).await;
    assert_eq!(cart.json["data"], json!([]));

    // Removing again is fine
    let resp = app.send(Method::DELETE, "/api/cart/101", Some("alice"), None).await;
    assert_eq!(resp.status, 200);
}

#[tokio::test]
async fn test_update_errors() {
    let app = TestApp::new();

    let resp = app
        .send(Method::PUT, "/api/cart/5", Some("alice"), Some(json!({ "quantity": 2 })))
        .await;
    assert_eq!(resp.status, 404);

    let resp = app
        .send(Method::PUT, "/api/cart/5", Some("alice"), Some(json!({ "quantity": -1 })))
        .await;
    assert_eq!(resp.status, 400);

    let resp = app
        .send(Method::PUT, "/api/cart/abc", Some("alice"), Some(json!({ "quantity": 1 })))
        .await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message(), Some("Invalid product ID or quantity"));

    let resp = app.get("/api/cart/abc/quantity", Some("alice")).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message(), Some("Invalid product ID"));
}

#[tokio::test]
async fn test_clear_cart() {
    let app = TestApp::new();
    add(&app, "alice", 1, 1).await;
    add(&app, "bob", 1, 1).await;

    let resp = app.send(Method::DELETE, "/api/cart", Some("alice"), None).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.message(), Some("Cart cleared"));

    assert_eq!(app.get("/api/cart", Some("alice")).await.json["data"], json!([]));
    assert_eq!(
        app.get("/api/cart", Some("bob")).await.json["data"]
            .as_array()
            .map(Vec::len),
        Some(1)
    );
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_checkout_creates_order_and_empties_cart() {
    let app = TestApp::new();
    add(&app, "alice", 1, 2).await; // 2 x 29.99
    add(&app, "alice", 101, 1).await; // 129.99

    let resp = checkout(&app, "alice", checkout_body()).await;
    assert_eq!(resp.status, 201);

    let order = &resp.json["data"];
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotal"], 189.97);
    assert_eq!(order["tax"], 15.2);
    assert_eq!(order["total"], 205.17);
    assert_eq!(order["payment"]["cardLast4"], "1234");
    assert_eq!(order["shippingInfo"]["zipCode"], "62701");
    assert!(order["id"].as_str().is_some_and(|id| id.starts_with("ORD-")));

    // No secrets in the stored order
    assert!(!resp.text.contains("cardNumber"));
    assert!(!resp.text.contains("cvv"));
    assert!(!resp.text.contains("1111 1111"));

    let cart = app.get("/api/cart", Some("alice")).await;
    assert_eq!(cart.json["data"], json!([]));

    let orders = app.get("/api/orders", Some("alice")).await;
    assert_eq!(orders.json["data"][0]["id"], order["id"]);
}

#[tokio::test]
async fn test_orders_are_newest_first() {
    let app = TestApp::new();

    add(&app, "alice", 1, 1).await;
    let first = checkout(&app, "alice", checkout_body()).await.json["data"]["id"].clone();
    add(&app, "alice", 2, 1).await;
    let second = checkout(&app, "alice", checkout_body()).await.json["data"]["id"].clone();

    assert_ne!(first, second);
    let orders = app.get("/api/orders", Some("alice")).await;
    assert_eq!(orders.json["data"][0]["id"], second);
    assert_eq!(orders.json["data"][1]["id"], first);
}

#[tokio::test]
async fn test_checkout_validation() {
    let app = TestApp::new();

    let resp = checkout(&app, "alice", checkout_body()).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message(), Some("Cannot create order with empty cart"));

    add(&app, "alice", 1, 1).await;

    let mut no_zip = checkout_body();
    no_zip["shippingInfo"]["zipCode"] = json!("");
    let resp = checkout(&app, "alice", no_zip).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message(), Some("Shipping information is required"));

    let mut no_cvv = checkout_body();
    if let Some(payment) = no_cvv["paymentInfo"].as_object_mut() {
        payment.remove("cvv");
    }
    let resp = checkout(&app, "alice", no_cvv).await;
    assert_eq!(resp.status, 400);
    assert_eq!(resp.message(), Some("Payment information is required"));

    let resp = checkout(&app, "alice", json!({})).await;
    assert_eq!(resp.message(), Some("Shipping information is required"));

    // Failed checkouts leave the cart alone
    let resp = app.get("/api/cart/1/quantity", Some("alice")).await;
    assert_eq!(resp.json["data"]["quantity"], 1);
}

#[tokio::test]
async fn test_get_order_by_id() {
    let app = TestApp::new();
    add(&app, "alice", 1, 1).await;
    let created = checkout(&app, "alice", checkout_body()).await;
    let id = created.json["data"]["id"].as_str().unwrap_or_default().to_string();

    let resp = app.get(&format!("/api/orders/{id}"), Some("alice")).await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json["data"]["id"], id.as_str());

    // Orders are private to their shopper
    let resp = app.get(&format!("/api/orders/{id}"), Some("bob")).await;
    assert_eq!(resp.status, 404);
    assert_eq!(resp.message(), Some("Order not found"));
}

#[tokio::test]
async fn test_update_order_status() {
    let app = TestApp::new();
    add(&app, "alice", 1, 1).await;
    let created = checkout(&app, "alice", checkout_body()).await;
    let id = created.json["data"]["id"].as_str().unwrap_or_default().to_string();
    let uri = format!("/api/orders/{id}/status");

    let resp = app
        .send(Method::PUT, &uri, Some("alice"), Some(json!({ "status": "shipped" })))
        .await;
    assert_eq!(resp.status, 200);
    assert_eq!(resp.json["data"]["status"], OrderStatus::Shipped.to_string());

    let resp = app
        .send(Method::PUT, &uri, Some("alice"), Some(json!({ "status": "lost" })))
        .await;
    assert_eq!(resp.status, 400);

    let resp = app
        .send(
            Method::PUT,
            "/api/orders/ORD-0-0/status",
            Some("alice"),
            Some(json!({ "status": "shipped" })),
        )
        .await;
    assert_eq!(resp.status, 404);
}
