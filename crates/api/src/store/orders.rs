//! Order store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use microshop_core::{CardSummary, OrderId, OrderStatus, Price, Product, UserId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{CartItem, Result, StoreError};

/// A purchased product snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: u32,
}

impl From<CartItem> for OrderItem {
    fn from(item: CartItem) -> Self {
        Self {
            product: item.product,
            quantity: item.quantity,
        }
    }
}

/// Delivery address.
///
/// Every field defaults to empty so that incomplete submissions reach
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingInfo {
    pub full_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingInfo {
    /// Names of required fields that are blank. `country` is optional.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment: CardSummary,
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

/// Everything needed to create an order except what the store assigns.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub items: Vec<OrderItem>,
    pub shipping_info: ShippingInfo,
    pub payment: CardSummary,
    pub subtotal: Price,
    pub tax: Price,
    pub total: Price,
}

/// Per-shopper order history, newest first.
#[derive(Debug)]
pub struct OrderStore {
    orders: RwLock<HashMap<UserId, Vec<Order>>>,
    sequence: AtomicU64,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }

    /// Record a new pending order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyOrder` if `new_order` has no items.
    pub async fn create(&self, user: &UserId, new_order: NewOrder) -> Result<Order> {
        if new_order.items.is_empty() {
            return Err(StoreError::EmptyOrder);
        }

        let created_at = Utc::now();
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        let order = Order {
            id: OrderId::generate(created_at.timestamp_millis(), sequence),
            user_id: user.clone(),
            items: new_order.items,
            shipping_info: new_order.shipping_info,
            payment: new_order.payment,
            subtotal: new_order.subtotal,
            tax: new_order.tax,
            total: new_order.total,
            created_at,
            status: OrderStatus::Pending,
        };

        let mut orders = self.orders.write().await;
        let history = orders.entry(user.clone()).or_default();
        // Insert at the front so the stable sort keeps same-instant orders newest first
        history.insert(0, order.clone());
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(order)
    }

    /// A copy of the shopper's orders, newest first.
    pub async fn list(&self, user: &UserId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default()
    }

    /// One of the shopper's orders.
    pub async fn get_by_id(&self, user: &UserId, order_id: &OrderId) -> Option<Order> {
        self.orders
            .read()
            .await
            .get(user)?
            .iter()
            .find(|o| &o.id == order_id)
            .cloned()
    }

    /// Change an order's status, returning the updated order.
    pub async fn update_status(
        &self,
        user: &UserId,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Option<Order> {
        let mut orders = self.orders.write().await;
        let order = orders
            .get_mut(user)?
            .iter_mut()
            .find(|o| &o.id == order_id)?;
        order.status = status;
        Some(order.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            full_name: "Jane Doe".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62701".to_string(),
            country: String::new(),
        }
    }

    fn new_order(items: Vec<OrderItem>) -> NewOrder {
        let subtotal: Price = items.iter().map(|i| i.product.price.times(i.quantity)).sum();
        let tax = subtotal.percent(8);
        NewOrder {
            items,
            shipping_info: shipping(),
            payment: CardSummary::mask("4111111111111111", "Jane Doe", "12/29"),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    fn item(id: i32, quantity: u32) -> OrderItem {
        OrderItem {
            product: Product::new(id, "Thing", 1000, "📦", "Misc", "Things"),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_pending_status_and_id() {
        let store = OrderStore::new();
        let order = store
            .create(&user("alice"), new_order(vec![item(1, 2)]))
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.id.as_str().starts_with("ORD-"));
        assert_eq!(order.user_id, user("alice"));
        assert_eq!(order.subtotal, Price::from_cents(2000));
        assert_eq!(order.tax, Price::from_cents(160));
        assert_eq!(order.total, Price::from_cents(2160));
    }

    #[tokio::test]
    async fn test_create_empty_order_fails() {
        let store = OrderStore::new();
        let result = store.create(&user("alice"), new_order(Vec::new())).await;

        assert_eq!(result, Err(StoreError::EmptyOrder));
        assert!(store.list(&user("alice")).await.is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let store = OrderStore::new();
        let first = store
            .create(&user("alice"), new_order(vec![item(1, 1)]))
            .await
            .unwrap();
        let second = store
            .create(&user("alice"), new_order(vec![item(1, 1)]))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = OrderStore::new();
        let alice = user("alice");

        let first = store.create(&alice, new_order(vec![item(1, 1)])).await.unwrap();
        let second = store.create(&alice, new_order(vec![item(2, 1)])).await.unwrap();
        let third = store.create(&alice, new_order(vec![item(3, 1)])).await.unwrap();

        let ids: Vec<OrderId> = store.list(&alice).await.into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn test_list_unknown_user_is_empty() {
        let store = OrderStore::new();
        assert!(store.list(&user("nobody")).await.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_is_scoped_to_user() {
        let store = OrderStore::new();
        let order = store
            .create(&user("alice"), new_order(vec![item(1, 1)]))
            .await
            .unwrap();

        assert_eq!(
            store.get_by_id(&user("alice"), &order.id).await,
            Some(order.clone())
        );
        assert!(store.get_by_id(&user("bob"), &order.id).await.is_none());
        assert!(
            store
                .get_by_id(&user("alice"), &OrderId::from("ORD-0-0"))
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = OrderStore::new();
        let alice = user("alice");
        let order = store.create(&alice, new_order(vec![item(1, 1)])).await.unwrap();

        let updated = store
            .update_status(&alice, &order.id, OrderStatus::Shipped)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Shipped);
        assert_eq!(
            store.get_by_id(&alice, &order.id).await.unwrap().status,
            OrderStatus::Shipped
        );

        assert!(
            store
                .update_status(&user("bob"), &order.id, OrderStatus::Cancelled)
                .await
                .is_none()
        );
    }

    #[test]
    fn test_shipping_missing_fields() {
        assert!(shipping().missing_fields().is_empty());

        let partial = ShippingInfo {
            city: "  ".to_string(),
            zip_code: String::new(),
            ..shipping()
        };
        assert_eq!(partial.missing_fields(), vec!["city", "zipCode"]);
    }
}
