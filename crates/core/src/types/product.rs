//! Catalog product.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product in the static catalog.
///
/// `category` and `sub_category` are the product's own finer groupings
/// (e.g. `Tops` / `T-Shirts`); the main category is the catalog section the
/// product is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Emoji glyph or image URL.
    pub image: String,
    pub category: String,
    pub sub_category: String,
}

impl Product {
    /// Convenience constructor for seeding catalogs.
    #[must_use]
    pub fn new(
        id: i32,
        name: &str,
        price_cents: u32,
        image: &str,
        category: &str,
        sub_category: &str,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::from_cents(price_cents),
            image: image.to_owned(),
            category: category.to_owned(),
            sub_category: sub_category.to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let product = Product::new(1, "Classic White T-Shirt", 2999, "👕", "Tops", "T-Shirts");
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["id"], 1);
        assert_eq!(value["price"], 29.99);
        assert_eq!(value["subCategory"], "T-Shirts");
        assert!(value.get("sub_category").is_none());
    }
}
