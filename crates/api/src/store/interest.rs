//! Per-shopper product view tracking.
//!
//! Every product detail view bumps a counter for the (user, product) pair.
//! Counters only grow; there is no decay and no expiry. Aggregation by
//! category happens on demand so it always reflects the latest views.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use microshop_core::{MainCategory, ProductId, UserId};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::catalog::ProductCatalog;

/// Summed visit counts by main category, then sub-category.
///
/// Only buckets the shopper actually visited are present.
pub type AggregatedInterests = BTreeMap<MainCategory, BTreeMap<String, u64>>;

/// How often a shopper has viewed one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInterest {
    pub product_id: ProductId,
    pub visit_count: u64,
}

#[derive(Debug, Clone, Copy)]
struct VisitCounter {
    visit_count: u64,
    /// Position of the first view, used to keep listings stable.
    first_seen: u64,
}

#[derive(Debug, Default)]
struct UserVisits {
    products: HashMap<ProductId, VisitCounter>,
    next_seq: u64,
}

/// In-memory view counters for all shoppers.
#[derive(Debug)]
pub struct InterestTracker {
    catalog: Arc<ProductCatalog>,
    users: RwLock<HashMap<UserId, UserVisits>>,
}

impl InterestTracker {
    /// Create an empty tracker that resolves products through `catalog`.
    #[must_use]
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self {
            catalog,
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Record one view of `product_id`.
    ///
    /// Anonymous views (`user` is `None`) are not tracked. The product id is
    /// not validated here; unknown products are ignored at aggregation time.
    pub async fn track_view(&self, user: Option<&UserId>, product_id: ProductId) {
        let Some(user) = user else {
            return;
        };

        let mut users = self.users.write().await;
        let visits = users.entry(user.clone()).or_default();
        let next_seq = visits.next_seq;
        let counter = visits
            .products
            .entry(product_id)
            .or_insert(VisitCounter {
                visit_count: 0,
                first_seen: next_seq,
            });
        counter.visit_count += 1;
        if counter.first_seen == next_seq {
            visits.next_seq += 1;
        }

        tracing::debug!(user_id = %user, %product_id, visit_count = counter.visit_count, "Tracked product view");
    }

    /// All view counters of a shopper, ordered by first view.
    pub async fn get_user_interests(&self, user: &UserId) -> Vec<UserInterest> {
        let users = self.users.read().await;
        let Some(visits) = users.get(user) else {
            return Vec::new();
        };

        let mut entries: Vec<(ProductId, VisitCounter)> =
            visits.products.iter().map(|(id, c)| (*id, *c)).collect();
        entries.sort_by_key(|(_, counter)| counter.first_seen);

        entries
            .into_iter()
            .map(|(product_id, counter)| UserInterest {
                product_id,
                visit_count: counter.visit_count,
            })
            .collect()
    }

    /// Visit counts summed per (main category, sub-category).
    ///
    /// Products that no longer resolve in the catalog are skipped.
    pub async fn get_aggregated_interests(&self, user: &UserId) -> AggregatedInterests {
        let mut aggregated = AggregatedInterests::new();

        for interest in self.get_user_interests(user).await {
            let Some(entry) = self.catalog.find_by_id(interest.product_id) else {
                continue;
            };

            *aggregated
                .entry(entry.main_category)
                .or_default()
                .entry(entry.product.sub_category.clone())
                .or_default() += interest.visit_count;
        }

        aggregated
    }

    /// Forget everything tracked for a shopper.
    pub async fn clear_user_interests(&self, user: &UserId) {
        self.users.write().await.remove(user);
    }
}
