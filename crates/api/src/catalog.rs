//! Static product catalog.
//!
//! Products are grouped by [`MainCategory`] and never change after startup.
//! The id index is built once in the constructor, so lookups never mutate
//! the catalog.

use std::collections::{BTreeMap, HashMap};

use microshop_core::{MainCategory, Product, ProductId};
use thiserror::Error;

/// Errors building a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id {0} appears more than once")]
    DuplicateProduct(ProductId),
}

/// A product together with the main category it is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    pub product: &'a Product,
    pub main_category: MainCategory,
}

/// Read-only product catalog with an id index.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    sections: BTreeMap<MainCategory, Vec<Product>>,
    index: HashMap<ProductId, (MainCategory, usize)>,
}

impl ProductCatalog {
    /// Build a catalog from per-category product lists.
    ///
    /// Lists for the same category are concatenated in the order given.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateProduct` if a product id is used twice,
    /// even across categories.
    pub fn new(
        sections: impl IntoIterator<Item = (MainCategory, Vec<Product>)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for (category, products) in sections {
            let section = catalog.sections.entry(category).or_default();
            for product in products {
                if catalog.index.contains_key(&product.id) {
                    return Err(CatalogError::DuplicateProduct(product.id));
                }
                catalog
                    .index
                    .insert(product.id, (category, section.len()));
                section.push(product);
            }
        }

        Ok(catalog)
    }

    /// Products listed under a category key, or an empty slice for unknown keys.
    #[must_use]
    pub fn get_by_category(&self, category: &str) -> &[Product] {
        MainCategory::from_key(category)
            .and_then(|c| self.sections.get(&c))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Products in a category whose sub-category matches case-insensitively.
    ///
    /// A blank sub-category returns the whole category.
    #[must_use]
    pub fn get_by_category_and_sub_category(
        &self,
        category: &str,
        sub_category: &str,
    ) -> Vec<&Product> {
        let products = self.get_by_category(category);
        if sub_category.is_empty() {
            return products.iter().collect();
        }

        let wanted = sub_category.to_lowercase();
        products
            .iter()
            .filter(|p| p.sub_category.to_lowercase() == wanted)
            .collect()
    }

    /// A product by id within one category.
    #[must_use]
    pub fn get_by_category_and_id(&self, category: &str, id: ProductId) -> Option<&Product> {
        let main_category = MainCategory::from_key(category)?;
        self.find_by_id(id)
            .filter(|entry| entry.main_category == main_category)
            .map(|entry| entry.product)
    }

    /// A product by id across all categories.
    #[must_use]
    pub fn find_by_id(&self, id: ProductId) -> Option<CatalogEntry<'_>> {
        let &(main_category, position) = self.index.get(&id)?;
        let product = self.sections.get(&main_category)?.get(position)?;
        Some(CatalogEntry {
            product,
            main_category,
        })
    }

    /// Every product, in menu order of their categories.
    pub fn get_all(&self) -> impl Iterator<Item = &Product> {
        self.sections.values().flatten()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The demo catalog served by the storefront.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the seed ids are unique.
    pub fn demo() -> Result<Self, CatalogError> {
        Self::new([
            (
                MainCategory::Clothing,
                vec![
                    Product::new(1, "Classic White T-Shirt", 2999, "👕", "Tops", "T-Shirts"),
                    Product::new(2, "Denim Jacket", 7999, "🧥", "Outerwear", "Jackets"),
                    Product::new(3, "Slim Fit Jeans", 5999, "👖", "Bottoms", "Jeans"),
                    Product::new(4, "Cotton Hoodie", 4999, "👔", "Tops", "Hoodies"),
                    Product::new(5, "Chino Pants", 5499, "👖", "Bottoms", "Pants"),
                    Product::new(6, "Polo Shirt", 3999, "👕", "Tops", "Polo Shirts"),
                    Product::new(7, "Wool Sweater", 6999, "🧶", "Tops", "Sweaters"),
                    Product::new(8, "Cargo Shorts", 4499, "🩳", "Bottoms", "Shorts"),
                    Product::new(9, "Leather Jacket", 14999, "🧥", "Outerwear", "Jackets"),
                    Product::new(10, "Button-Down Shirt", 4999, "👔", "Tops", "Dress Shirts"),
                ],
            ),
            (
                MainCategory::Electronics,
                vec![
                    Product::new(101, "Wireless Headphones", 12999, "🎧", "Audio", "Headphones"),
                    Product::new(102, "Smart TV 55\"", 59999, "📺", "TV", "Smart-TVs"),
                    Product::new(103, "Laptop Stand", 3999, "💻", "Accessories", "Stands"),
                    Product::new(104, "Mechanical Keyboard", 8999, "⌨️", "Accessories", "Keyboards"),
                    Product::new(105, "Gaming Mouse", 5999, "🖱️", "Accessories", "Mice"),
                    Product::new(106, "USB-C Hub", 3499, "🔌", "Accessories", "Adapters"),
                    Product::new(107, "Bluetooth Speaker", 7999, "🔊", "Audio", "Speakers"),
                    Product::new(108, "Monitor 27\"", 24999, "🖥️", "Display", "Monitors"),
                    Product::new(109, "Webcam HD", 4999, "📹", "Accessories", "Cameras"),
                    Product::new(110, "Tablet Stand", 2499, "📱", "Accessories", "Stands"),
                ],
            ),
            (
                MainCategory::Mobiles,
                vec![
                    Product::new(201, "Smartphone Pro Max", 99999, "📱", "Flagship", "Premium"),
                    Product::new(202, "Budget Phone", 19999, "📱", "Budget", "Entry Level"),
                    Product::new(203, "Gaming Phone", 79999, "🎮", "Gaming", "Performance"),
                    Product::new(204, "Phone Case", 1999, "📱", "Accessories", "Protection"),
                    Product::new(205, "Screen Protector", 1499, "🛡️", "Accessories", "Protection"),
                    Product::new(206, "Wireless Charger", 2999, "🔋", "Accessories", "Charging"),
                    Product::new(207, "Phone Stand", 1299, "📱", "Accessories", "Stands"),
                    Product::new(208, "Bluetooth Earbuds", 7999, "🎧", "Audio", "Earbuds"),
                    Product::new(209, "Power Bank", 3999, "🔌", "Accessories", "Charging"),
                    Product::new(210, "Phone Grip", 999, "📱", "Accessories", "Grips"),
                ],
            ),
        ])
    }
}
