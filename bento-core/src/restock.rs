// Restock configuration supplied by the presentation surface at tick time

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::types::{ProductKey, Quantity};

// === RAW INPUT ===

/// What the host read from its restock selectors, before interpretation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(from_wasm_abi)]
pub struct RestockInput {
    pub product: String,
    pub quantity: QuantityInput,
}

/// The quantity field arrives either as a number or as the raw input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[serde(untagged)]
pub enum QuantityInput {
    Count(f64),
    Text(String),
}

impl RestockInput {
    pub fn new(product: impl Into<String>, quantity: QuantityInput) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }

    pub fn resolve(&self) -> RestockOrder {
        let amount = match &self.quantity {
            QuantityInput::Count(n) => quantity_from_number(*n),
            QuantityInput::Text(text) => parse_quantity(text),
        };
        RestockOrder::new(self.product.as_str(), amount)
    }
}

// === RESOLVED ORDER ===

/// Product and per-shop amount for one restock phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockOrder {
    pub product: ProductKey,
    pub amount: Quantity,
}

impl RestockOrder {
    pub fn new(product: impl Into<ProductKey>, amount: Quantity) -> Self {
        Self {
            product: product.into(),
            amount,
        }
    }
}

impl From<&str> for RestockOrder {
    /// Zero-amount order; restocking becomes a no-op.
    fn from(product: &str) -> Self {
        Self::new(product, 0)
    }
}

// === PARSING ===

/// Interpret input text as a leading base-10 integer.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit. No digits, or a negative value, yields 0. Values beyond
/// the count range saturate.
pub fn parse_quantity(text: &str) -> Quantity {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };

    if digits.is_empty() || negative {
        return 0;
    }

    digits.bytes().fold(0 as Quantity, |acc, b| {
        acc.saturating_mul(10).saturating_add((b - b'0') as Quantity)
    })
}

fn quantity_from_number(n: f64) -> Quantity {
    if !n.is_finite() || n <= 0.0 {
        return 0;
    }
    // `as` saturates at Quantity::MAX
    n.trunc() as Quantity
}
