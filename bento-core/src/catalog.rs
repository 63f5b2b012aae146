// Product catalog: the fixed set of bento types shops can stock

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::types::{Money, ProductKey};

// === PRODUCT TYPE ===

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductType {
    pub key: ProductKey,
    pub label: String,
    pub sale_price: Money,
    pub unit_cost: Money,
}

impl ProductType {
    pub fn new(key: impl Into<String>, label: impl Into<String>, sale_price: Money, unit_cost: Money) -> Self {
        Self {
            key: ProductKey::new(key),
            label: label.into(),
            sale_price,
            unit_cost,
        }
    }

    /// Profit on one unit bought at cost and sold at the listed price
    pub fn margin(&self) -> Money {
        self.sale_price - self.unit_cost
    }
}

/// The three bento types of the stock game, in display order.
pub fn bento_products() -> Vec<ProductType> {
    vec![
        ProductType::new("simple", "Simple Bento", 300, 200),
        ProductType::new("deluxe", "Deluxe Bento", 500, 400),
        ProductType::new("healthy", "Healthy Bento", 400, 300),
    ]
}

// === CATALOG ===

/// Immutable, nonempty list of product types.
///
/// Declaration order is significant: the sell phase and every display walk
/// products in this order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<ProductType>,
}

impl Catalog {
    /// Validate and freeze a product list.
    pub fn new(products: Vec<ProductType>) -> Result<Self, ConfigError> {
        if products.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.key.as_str()) {
                return Err(ConfigError::DuplicateProduct(product.key.clone()));
            }
            if product.sale_price <= 0 || product.unit_cost <= 0 {
                return Err(ConfigError::NonPositivePrice {
                    key: product.key.clone(),
                    sale_price: product.sale_price,
                    unit_cost: product.unit_cost,
                });
            }
        }

        Ok(Self { products })
    }

    pub fn bento() -> Self {
        Self {
            products: bento_products(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ProductType> {
        self.products.iter().find(|p| p.key.as_str() == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductType> {
        self.products.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ProductKey> {
        self.products.iter().map(|p| &p.key)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Always false for a constructed catalog; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Most a single shop can earn in one tick (one unit of every product).
    pub fn max_income_per_shop(&self) -> Money {
        self.products.iter().map(|p| p.sale_price).sum()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::bento()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bento_catalog_passes_validation() {
        let catalog = Catalog::new(bento_products()).unwrap();
        let keys: Vec<&str> = catalog.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["simple", "deluxe", "healthy"]);
        assert_eq!(catalog.max_income_per_shop(), 1200);
        assert_eq!(catalog.get("deluxe").unwrap().margin(), 100);
    }

    #[test]
    fn rejects_empty_and_duplicate_catalogs() {
        assert!(matches!(Catalog::new(vec![]), Err(ConfigError::EmptyCatalog)));

        let dupes = vec![
            ProductType::new("simple", "A", 300, 200),
            ProductType::new("simple", "B", 310, 210),
        ];
        match Catalog::new(dupes) {
            Err(ConfigError::DuplicateProduct(key)) => assert_eq!(key.as_str(), "simple"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_positive_prices() {
        let free = vec![ProductType::new("free", "Free Bento", 0, 100)];
        assert!(matches!(
            Catalog::new(free),
            Err(ConfigError::NonPositivePrice { .. })
        ));

        let costless = vec![ProductType::new("air", "Air Bento", 100, -5)];
        assert!(matches!(
            Catalog::new(costless),
            Err(ConfigError::NonPositivePrice { .. })
        ));
    }

    #[test]
    fn single_product_catalog_is_allowed() {
        let catalog = Catalog::new(vec![ProductType::new("onigiri", "Onigiri", 150, 90)]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("onigiri"));
        assert!(!catalog.contains("simple"));
    }
}
