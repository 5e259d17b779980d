//! Shopping cart store.

use std::collections::HashMap;
use std::sync::Arc;

use microshop_core::{Price, Product, ProductId, UserId};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{Result, StoreError};
use crate::catalog::ProductCatalog;

/// One cart line: a product snapshot and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Per-shopper carts. Lines keep the order in which they were first added.
#[derive(Debug)]
pub struct CartStore {
    catalog: Arc<ProductCatalog>,
    carts: RwLock<HashMap<UserId, Vec<CartItem>>>,
}

impl CartStore {
    /// Create an empty store that resolves products through `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            catalog,
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// A copy of the shopper's cart lines.
    pub async fn get(&self, user: &UserId) -> Vec<CartItem> {
        self.carts
            .read()
            .await
            .get(user)
            .cloned()
            .unwrap_or_default()
    }

    /// Add `quantity` units of a product, merging into an existing line.
    ///
    /// Quantities are additive and uncapped (saturating at `u32::MAX`).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ProductNotFound` if the product is not in the catalog.
    pub async fn add(&self, user: &UserId, product_id: ProductId, quantity: u32) -> Result<CartItem> {
        let product = self
            .catalog
            .find_by_id(product_id)
            .ok_or(StoreError::ProductNotFound(product_id))?
            .product;

        let mut carts = self.carts.write().await;
        let lines = carts.entry(user.clone()).or_default();

        if let Some(line) = lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return Ok(line.clone());
        }

        let line = CartItem {
            product: product.clone(),
            quantity,
        };
        lines.push(line.clone());
        Ok(line)
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero or less removes the line and returns `None`, whether
    /// or not it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ItemNotInCart` for a positive quantity on a product
    /// that is not in the cart.
    pub async fn update(
        &self,
        user: &UserId,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<Option<CartItem>> {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        let mut carts = self.carts.write().await;

        if quantity == 0 {
            if let Some(lines) = carts.get_mut(user) {
                lines.retain(|l| l.product.id != product_id);
            }
            return Ok(None);
        }

        let line = carts
            .get_mut(user)
            .and_then(|lines| lines.iter_mut().find(|l| l.product.id == product_id))
            .ok_or(StoreError::ItemNotInCart(product_id))?;
        line.quantity = quantity;
        Ok(Some(line.clone()))
    }

    /// Remove a product from the cart. Removing an absent product is a no-op.
    pub async fn remove(&self, user: &UserId, product_id: ProductId) {
        if let Some(lines) = self.carts.write().await.get_mut(user) {
            lines.retain(|l| l.product.id != product_id);
        }
    }

    /// Empty the shopper's cart.
    pub async fn clear(&self, user: &UserId) {
        self.carts.write().await.remove(user);
    }

    /// Units of a product in the cart, zero if absent.
    pub async fn get_quantity(&self, user: &UserId, product_id: ProductId) -> u32 {
        self.carts
            .read()
            .await
            .get(user)
            .and_then(|lines| lines.iter().find(|l| l.product.id == product_id))
            .map_or(0, |l| l.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> CartStore {
        CartStore::new(Arc::new(ProductCatalog::demo().unwrap()))
    }

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let store = store();
        assert!(store.get(&user("alice")).await.is_empty());
        assert_eq!(store.get_quantity(&user("alice"), ProductId::new(1)).await, 0);
    }

    #[tokio::test]
    async fn test_add_is_additive() {
        let store = store();
        let alice = user("alice");

        store.add(&alice, ProductId::new(1), 2).await.unwrap();
        let line = store.add(&alice, ProductId::new(1), 3).await.unwrap();

        assert_eq!(line.quantity, 5);
        assert_eq!(store.get_quantity(&alice, ProductId::new(1)).await, 5);
        assert_eq!(store.get(&alice).await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_snapshots_product() {
        let store = store();
        let line = store
            .add(&user("alice"), ProductId::new(101), 1)
            .await
            .unwrap();

        assert_eq!(line.product.name, "Wireless Headphones");
        assert_eq!(line.line_total(), Price::from_cents(12999));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let store = store();
        let result = store.add(&user("alice"), ProductId::new(999), 1).await;

        assert_eq!(result, Err(StoreError::ProductNotFound(ProductId::new(999))));
        assert!(store.get(&user("alice")).await.is_empty());
    }

    #[tokio::test]
    async fn test_lines_keep_insertion_order() {
        let store = store();
        let alice = user("alice");

        store.add(&alice, ProductId::new(201), 1).await.unwrap();
        store.add(&alice, ProductId::new(1), 1).await.unwrap();
        store.add(&alice, ProductId::new(201), 1).await.unwrap();

        let ids: Vec<i32> = store
            .get(&alice)
            .await
            .iter()
            .map(|l| l.product.id.as_i32())
            .collect();
        assert_eq!(ids, vec![201, 1]);
    }

    #[tokio::test]
    async fn test_update_overwrites_quantity() {
        let store = store();
        let alice = user("alice");
        store.add(&alice, ProductId::new(1), 2).await.unwrap();

        let line = store.update(&alice, ProductId::new(1), 7).await.unwrap();

        assert_eq!(line.map(|l| l.quantity), Some(7));
        assert_eq!(store.get_quantity(&alice, ProductId::new(1)).await, 7);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes() {
        let store = store();
        let alice = user("alice");
        store.add(&alice, ProductId::new(1), 9).await.unwrap();

        assert_eq!(store.update(&alice, ProductId::new(1), 0).await, Ok(None));
        assert!(store.get(&alice).await.is_empty());

        // Idempotent, also for negative quantities and unknown carts
        assert_eq!(store.update(&alice, ProductId::new(1), -3).await, Ok(None));
        assert_eq!(
            store.update(&user("bob"), ProductId::new(1), 0).await,
            Ok(None)
        );
    }

    #[tokio::test]
    async fn test_update_missing_line_fails() {
        let store = store();
        let alice = user("alice");

        assert_eq!(
            store.update(&alice, ProductId::new(1), 2).await,
            Err(StoreError::ItemNotInCart(ProductId::new(1)))
        );

        store.add(&alice, ProductId::new(2), 1).await.unwrap();
        assert_eq!(
            store.update(&alice, ProductId::new(1), 2).await,
            Err(StoreError::ItemNotInCart(ProductId::new(1)))
        );
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = store();
        let alice = user("alice");
        store.add(&alice, ProductId::new(1), 1).await.unwrap();
        store.add(&alice, ProductId::new(2), 1).await.unwrap();

        store.remove(&alice, ProductId::new(1)).await;
        store.remove(&alice, ProductId::new(1)).await;
        store.remove(&user("bob"), ProductId::new(1)).await;

        let cart = store.get(&alice).await;
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.first().unwrap().product.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn test_clear() {
        let store = store();
        let alice = user("alice");
        let bob = user("bob");
        store.add(&alice, ProductId::new(1), 1).await.unwrap();
        store.add(&bob, ProductId::new(1), 1).await.unwrap();

        store.clear(&alice).await;
        store.clear(&alice).await;

        assert!(store.get(&alice).await.is_empty());
        assert_eq!(store.get(&bob).await.len(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_copy() {
        let store = store();
        let alice = user("alice");
        store.add(&alice, ProductId::new(1), 1).await.unwrap();

        let mut snapshot = store.get(&alice).await;
        snapshot.clear();

        assert_eq!(store.get(&alice).await.len(), 1);
    }
}
