use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::Catalog;
use crate::config::EconomyConfig;
use crate::shop::Shop;
use crate::types::{Money, Position, ShopId};

pub const DEFAULT_STARTING_FUNDS: Money = 10_000;
pub const DEFAULT_STORE_COST: Money = 1_000;

// ============================================================================
// Economy State - The complete simulation state
// ============================================================================

#[derive(Debug, Clone)]
pub struct EconomyState {
    /// Completed ticks
    pub day: u64,
    pub funds: Money,
    pub store_cost: Money,
    /// Build order. Never shrinks.
    pub shops: Vec<Shop>,
    /// Last map click not yet consumed by a build
    pub pending_selection: Option<Position>,
}

impl EconomyState {
    pub fn new(funds: Money, store_cost: Money) -> Self {
        Self {
            day: 0,
            funds,
            store_cost,
            shops: Vec::new(),
            pending_selection: None,
        }
    }

    pub fn from_config(config: &EconomyConfig) -> Self {
        Self::new(config.starting_funds, config.store_cost)
    }

    pub fn next_shop_id(&self) -> ShopId {
        ShopId::new(self.shops.len() as u32)
    }

    pub fn shop(&self, id: ShopId) -> Option<&Shop> {
        self.shops.get(id.index())
    }

    pub fn shop_mut(&mut self, id: ShopId) -> Option<&mut Shop> {
        self.shops.get_mut(id.index())
    }

    pub fn can_afford(&self, cost: Money) -> bool {
        self.funds >= cost
    }

    pub fn selection_text(&self) -> Option<String> {
        self.pending_selection.map(|p| p.display())
    }

    pub fn shop_statuses(&self, catalog: &Catalog) -> Vec<ShopStatus> {
        self.shops.iter().map(|s| s.status(catalog)).collect()
    }

    /// Units held across every shop for one product
    pub fn total_stock(&self, key: &str) -> u64 {
        self.shops.iter().map(|s| s.inventory.get(key) as u64).sum()
    }

    pub fn snapshot(&self, catalog: &Catalog) -> EconomySnapshot {
        EconomySnapshot {
            day: self.day,
            funds: self.funds,
            store_cost: self.store_cost,
            pending_selection: self.pending_selection,
            selection_text: self.selection_text(),
            shops: self.shop_statuses(catalog),
        }
    }
}

impl Default for EconomyState {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_FUNDS, DEFAULT_STORE_COST)
    }
}

// ============================================================================
// Serializable State Snapshot for JS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct EconomySnapshot {
    pub day: u64,
    pub funds: Money,
    pub store_cost: Money,
    pub pending_selection: Option<Position>,
    pub selection_text: Option<String>,
    pub shops: Vec<ShopStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct ShopStatus {
    /// One-based build number
    pub index: u32,
    pub position: Position,
    pub position_text: String,
    pub inventory: Vec<InventoryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct InventoryLine {
    pub key: String,
    pub label: String,
    pub count: u32,
}
