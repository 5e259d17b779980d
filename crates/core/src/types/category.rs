//! Main catalog categories.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a main category.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Top-level grouping of the catalog.
///
/// The variant order is the fixed header-menu order, and `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainCategory {
    Clothing,
    Electronics,
    Mobiles,
}

impl MainCategory {
    /// All main categories in menu order.
    pub const ALL: [Self; 3] = [Self::Clothing, Self::Electronics, Self::Mobiles];

    /// URL and config key (e.g. `clothing`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Clothing => "clothing",
            Self::Electronics => "electronics",
            Self::Mobiles => "mobiles",
        }
    }

    /// Human-readable menu title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Clothing => "Clothing",
            Self::Electronics => "Electronics",
            Self::Mobiles => "Mobiles",
        }
    }

    /// Shell route for the category page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Clothing => "/shopping/clothing",
            Self::Electronics => "/shopping/electronics",
            Self::Mobiles => "/shopping/mobiles",
        }
    }

    /// Look up a category by its key, returning `None` for anything else.
    ///
    /// Matching is exact: `Clothing` is not a key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for MainCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
