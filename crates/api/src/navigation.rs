//! Dashboard navigation configuration.
//!
//! The shell renders three menus from [`DashboardConfig`]. The header menu is
//! personalized: besides the three fixed main categories it promotes up to
//! three sub-categories the shopper has looked at most.
//!
//! # Header Synthesis
//!
//! 1. Flatten aggregated interest into `(main category, sub-category, count)`
//!    records.
//! 2. Rank by count descending. Ties go to the main category that comes first
//!    in the menu, then to the sub-category name (case-insensitive).
//! 3. Keep the top [`PERSONALIZED_SLOTS`] records across all categories.
//! 4. Emit each main category in menu order, each followed directly by its
//!    promoted sub-categories in rank order.
//!
//! The result always holds the three main categories and never more than
//! [`MAX_HEADER_ITEMS`] entries.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use microshop_core::MainCategory;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::store::AggregatedInterests;

/// Upper bound on header entries.
pub const MAX_HEADER_ITEMS: usize = 6;

/// Header entries available for promoted sub-categories.
pub const PERSONALIZED_SLOTS: usize = MAX_HEADER_ITEMS - MainCategory::ALL.len();

/// Characters that may not appear in a slug.
static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]").expect("Invalid regex"));

/// Runs of hyphens.
static HYPHEN_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("Invalid regex"));

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub path: String,
    pub title: String,
}

impl NavItem {
    fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }
}

/// An ordered menu keyed by entry name.
///
/// Serializes as a JSON object whose key order is the menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavConfig {
    entries: Vec<(String, NavItem)>,
}

impl NavConfig {
    /// The unpersonalized header: the three main categories.
    #[must_use]
    pub fn static_header() -> Self {
        let mut config = Self::default();
        for category in MainCategory::ALL {
            config.push(
                category.key(),
                NavItem::new(category.path(), category.title()),
            );
        }
        config
    }

    /// The account menu on the left of the shell.
    #[must_use]
    pub fn left_nav() -> Self {
        let mut config = Self::default();
        config.push("profile", NavItem::new("/profile", "Profile"));
        config.push("cart", NavItem::new("/cart", "Cart"));
        config.push("orders", NavItem::new("/orders", "Orders"));
        config
    }

    /// Routes reachable from within other flows.
    #[must_use]
    pub fn secondary() -> Self {
        let mut config = Self::default();
        config.push("checkout", NavItem::new("/cart/checkout", "Checkout"));
        config.push("payment", NavItem::new("/orders/payment", "Payment"));
        config
    }

    fn push(&mut self, key: impl Into<String>, item: NavItem) {
        self.entries.push((key.into(), item));
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the menu has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry keys in menu order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavItem)> {
        self.entries.iter().map(|(key, item)| (key.as_str(), item))
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NavItem> {
        self.iter().find(|(k, _)| *k == key).map(|(_, item)| item)
    }

    /// The entry that should be highlighted for `location`.
    ///
    /// An exact path match wins. Otherwise the entry with the longest path
    /// that `location` is nested under is chosen, so `/shopping/clothing/jeans`
    /// activates a promoted `jeans` entry rather than `clothing`.
    #[must_use]
    pub fn active_key(&self, location: &str) -> Option<&str> {
        if let Some((key, _)) = self.iter().find(|(_, item)| item.path == location) {
            return Some(key);
        }

        self.iter()
            .filter(|(_, item)| {
                location
                    .strip_prefix(item.path.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|(_, item)| item.path.len())
            .map(|(key, _)| key)
    }
}

impl Serialize for NavConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, item) in &self.entries {
            map.serialize_entry(key, item)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NavConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NavConfigVisitor;

        impl<'de> Visitor<'de> for NavConfigVisitor {
            type Value = NavConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of navigation entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut config = NavConfig::default();
                while let Some((key, item)) = access.next_entry::<String, NavItem>()? {
                    config.push(key, item);
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(NavConfigVisitor)
    }
}

/// All menus served to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    pub header_config: NavConfig,
    pub left_nav_config: NavConfig,
    pub secondary_config: NavConfig,
}

impl DashboardConfig {
    /// Wrap a header menu with the fixed account and secondary menus.
    #[must_use]
    pub fn with_header(header_config: NavConfig) -> Self {
        Self {
            header_config,
            left_nav_config: NavConfig::left_nav(),
            secondary_config: NavConfig::secondary(),
        }
    }
}

/// One flattened aggregation bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestRecord {
    pub main_category: MainCategory,
    pub sub_category: String,
    pub visit_count: u64,
}

/// Ranking order: count descending, then menu order, then sub-category name.
fn rank_order(a: &InterestRecord, b: &InterestRecord) -> Ordering {
    b.visit_count
        .cmp(&a.visit_count)
        .then(a.main_category.cmp(&b.main_category))
        .then_with(|| {
            a.sub_category
                .to_lowercase()
                .cmp(&b.sub_category.to_lowercase())
        })
        .then_with(|| a.sub_category.cmp(&b.sub_category))
}

/// Flatten and rank aggregated interest, best first.
#[must_use]
pub fn rank_interests(aggregated: &AggregatedInterests) -> Vec<InterestRecord> {
    let mut records: Vec<InterestRecord> = aggregated
        .iter()
        .flat_map(|(main_category, subs)| {
            subs.iter().map(|(sub_category, visit_count)| InterestRecord {
                main_category: *main_category,
                sub_category: sub_category.clone(),
                visit_count: *visit_count,
            })
        })
        .collect();
    records.sort_by(rank_order);
    records
}

/// URL-safe form of a sub-category name.
///
/// Lowercases, turns spaces into hyphens, drops anything outside
/// `[a-z0-9-]`, collapses hyphen runs and trims hyphens from both ends.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(' ', "-");
    let stripped = NON_SLUG_RE.replace_all(&lowered, "");
    let collapsed = HYPHEN_RUN_RE.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_owned()
}

/// Build the header menu.
///
/// `None` (anonymous shopper) yields the static header.
#[must_use]
pub fn build_header(aggregated: Option<&AggregatedInterests>) -> NavConfig {
    let Some(aggregated) = aggregated else {
        return NavConfig::static_header();
    };

    // Names that slug to nothing, or to a key already promoted, give up
    // their slot to the next record.
    let mut seen = HashSet::new();
    let promoted: Vec<(InterestRecord, String)> = rank_interests(aggregated)
        .into_iter()
        .filter_map(|record| {
            let slug = slugify(&record.sub_category);
            (!slug.is_empty() && seen.insert((record.main_category, slug.clone())))
                .then_some((record, slug))
        })
        .take(PERSONALIZED_SLOTS)
        .collect();

    let mut config = NavConfig::default();
    for category in MainCategory::ALL {
        config.push(
            category.key(),
            NavItem::new(category.path(), category.title()),
        );

        for (record, slug) in promoted
            .iter()
            .filter(|(record, _)| record.main_category == category)
        {
            config.push(
                format!("{}_{}", category.key(), slug.replace('-', "_")),
                NavItem::new(
                    format!("{}/{slug}", category.path()),
                    record.sub_category.clone(),
                ),
            );
        }
    }

    config
}
