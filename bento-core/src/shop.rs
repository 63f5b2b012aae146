// Shops and their per-product inventory

use std::collections::HashMap;

use crate::catalog::Catalog;
use crate::state::{InventoryLine, ShopStatus};
use crate::types::{Position, ProductKey, Quantity, ShopId};

// === INVENTORY ===

/// Unit counts per product, owned by exactly one shop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: HashMap<ProductKey, Quantity>,
}

impl Inventory {
    /// Zero units of every catalog product
    pub fn empty_for(catalog: &Catalog) -> Self {
        Self {
            counts: catalog.keys().map(|k| (k.clone(), 0)).collect(),
        }
    }

    pub fn get(&self, key: &str) -> Quantity {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Add units, returning the new count. `None` (and no change) on overflow.
    pub fn add(&mut self, key: &ProductKey, amount: Quantity) -> Option<Quantity> {
        let current = self.counts.entry(key.clone()).or_insert(0);
        let updated = current.checked_add(amount)?;
        *current = updated;
        Some(updated)
    }

    /// Remove a single unit if any is in stock.
    pub fn take_one(&mut self, key: &str) -> bool {
        match self.counts.get_mut(key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.values().map(|&q| q as u64).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&q| q == 0)
    }

    /// Counts in catalog order, including zero lines
    pub fn lines(&self, catalog: &Catalog) -> Vec<InventoryLine> {
        catalog
            .iter()
            .map(|product| InventoryLine {
                key: product.key.to_string(),
                label: product.label.clone(),
                count: self.get(product.key.as_str()),
            })
            .collect()
    }
}

// === SHOP ===

#[derive(Debug, Clone)]
pub struct Shop {
    pub id: ShopId,
    pub position: Position,
    pub inventory: Inventory,
}

impl Shop {
    pub fn new(id: ShopId, position: Position, catalog: &Catalog) -> Self {
        Self {
            id,
            position,
            inventory: Inventory::empty_for(catalog),
        }
    }

    pub fn status(&self, catalog: &Catalog) -> ShopStatus {
        ShopStatus {
            index: self.id.display_number(),
            position: self.position,
            position_text: self.position.display(),
            inventory: self.inventory.lines(catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_shop_has_zero_of_every_product() {
        let catalog = Catalog::bento();
        let shop = Shop::new(ShopId::new(0), Position::new(35.0, 139.0), &catalog);

        assert!(shop.inventory.is_empty());
        for key in catalog.keys() {
            assert_eq!(shop.inventory.get(key.as_str()), 0);
        }
        assert_eq!(shop.inventory.lines(&catalog).len(), 3);
    }

    #[test]
    fn take_one_never_goes_below_zero() {
        let catalog = Catalog::bento();
        let mut inv = Inventory::empty_for(&catalog);

        assert!(!inv.take_one("simple"));
        assert_eq!(inv.get("simple"), 0);

        inv.add(&ProductKey::new("simple"), 2);
        assert!(inv.take_one("simple"));
        assert!(inv.take_one("simple"));
        assert!(!inv.take_one("simple"));
        assert_eq!(inv.get("simple"), 0);
    }

    #[test]
    fn add_refuses_to_overflow() {
        let mut inv = Inventory::default();
        let key = ProductKey::new("deluxe");
        assert_eq!(inv.add(&key, Quantity::MAX - 1), Some(Quantity::MAX - 1));
        assert_eq!(inv.add(&key, 5), None);
        assert_eq!(inv.get("deluxe"), Quantity::MAX - 1);
    }

    #[test]
    fn status_lists_inventory_in_catalog_order() {
        let catalog = Catalog::bento();
        let mut shop = Shop::new(ShopId::new(2), Position::new(1.0, 2.0), &catalog);
        shop.inventory.add(&ProductKey::new("healthy"), 7);

        let status = shop.status(&catalog);
        assert_eq!(status.index, 3);
        assert_eq!(status.position_text, "Lat: 1.0000, Lng: 2.0000");
        let keys: Vec<&str> = status.inventory.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["simple", "deluxe", "healthy"]);
        assert_eq!(status.inventory[2].count, 7);
    }
}
