//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::config::ApiConfig;
use crate::store::{CartStore, InterestTracker, OrderStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the in-memory stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    catalog: Arc<ProductCatalog>,
    interests: InterestTracker,
    carts: CartStore,
    orders: OrderStore,
}

impl AppState {
    /// Create a new application state with empty stores.
    ///
    /// # Arguments
    ///
    /// * `config` - API configuration
    /// * `catalog` - Product catalog shared by the stores
    #[must_use]
    pub fn new(config: ApiConfig, catalog: ProductCatalog) -> Self {
        let catalog = Arc::new(catalog);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                interests: InterestTracker::new(Arc::clone(&catalog)),
                carts: CartStore::new(Arc::clone(&catalog)),
                orders: OrderStore::new(),
                catalog,
            }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the interest tracker.
    #[must_use]
    pub fn interests(&self) -> &InterestTracker {
        &self.inner.interests
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }
}
