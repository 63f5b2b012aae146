//! Error types returned by economy operations and configuration loading.

use thiserror::Error;

use crate::types::{Money, ProductKey};

/// Why a build request was refused. The message is shown to the player as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Click the map to choose a location first!")]
    NoSelection,
    #[error("Not enough funds to build a shop (have {funds}, need {cost})!")]
    InsufficientFunds { funds: Money, cost: Money },
}

/// Problems found while loading or validating an economy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse economy config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("product catalog must contain at least one product")]
    EmptyCatalog,
    #[error("duplicate product key '{0}'")]
    DuplicateProduct(ProductKey),
    #[error("product '{key}' needs a positive sale price and unit cost (got {sale_price} / {unit_cost})")]
    NonPositivePrice {
        key: ProductKey,
        sale_price: Money,
        unit_cost: Money,
    },
    #[error("starting funds must not be negative (got {0})")]
    NegativeFunds(Money),
    #[error("store cost must not be negative (got {0})")]
    NegativeStoreCost(Money),
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
