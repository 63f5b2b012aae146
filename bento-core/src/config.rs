//! Economy configuration: starting balance, build cost, tick cadence, map view
//! and the product catalog. Loaded once at startup from TOML; every field has
//! a default matching the stock game.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::{Catalog, ProductType, bento_products};
use crate::error::ConfigError;
use crate::state::{DEFAULT_STARTING_FUNDS, DEFAULT_STORE_COST};
use crate::types::{Money, Position};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_SHOP_LABEL: &str = "Bento Shop";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    pub starting_funds: Money,
    pub store_cost: Money,
    /// Wall-clock period between ticks
    pub tick_interval_ms: u64,
    /// Marker title for newly built shops
    pub shop_label: String,
    pub map: MapView,
    pub products: Vec<ProductConfig>,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_funds: DEFAULT_STARTING_FUNDS,
            store_cost: DEFAULT_STORE_COST,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            shop_label: DEFAULT_SHOP_LABEL.to_string(),
            map: MapView::default(),
            products: bento_products().into_iter().map(ProductConfig::from).collect(),
        }
    }
}

impl EconomyConfig {
    /// Parse and validate a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EconomyConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_funds < 0 {
            return Err(ConfigError::NegativeFunds(self.starting_funds));
        }
        if self.store_cost < 0 {
            return Err(ConfigError::NegativeStoreCost(self.store_cost));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.catalog().map(|_| ())
    }

    /// Build the validated product catalog in declaration order.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        Catalog::new(self.products.iter().cloned().map(ProductType::from).collect())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// === MAP VIEW ===

/// Initial camera for the host map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(default)]
pub struct MapView {
    pub center: Position,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        // Tokyo
        Self {
            center: Position::new(35.6895, 139.6917),
            zoom: 10,
        }
    }
}

// === PRODUCTS ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub key: String,
    /// Display name; falls back to the key
    #[serde(default)]
    pub label: Option<String>,
    pub sale_price: Money,
    pub unit_cost: Money,
}

impl From<ProductType> for ProductConfig {
    fn from(product: ProductType) -> Self {
        Self {
            key: product.key.to_string(),
            label: Some(product.label),
            sale_price: product.sale_price,
            unit_cost: product.unit_cost,
        }
    }
}

impl From<ProductConfig> for ProductType {
    fn from(config: ProductConfig) -> Self {
        let label = config.label.unwrap_or_else(|| config.key.clone());
        ProductType::new(config.key, label, config.sale_price, config.unit_cost)
    }
}
