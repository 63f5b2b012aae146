//! Commands emitted by economy operations for the map and presentation surfaces.
//!
//! Operations never touch the UI directly. They return a list of effects which
//! the host applies in order. Notifications are plain commands, so the core
//! never waits on the player to dismiss a dialog.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::Catalog;
use crate::state::{EconomyState, ShopStatus};
use crate::types::{Money, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    SetFunds { amount: Money },
    /// `None` clears the selection display
    SetSelection { text: Option<String> },
    SetBuildEnabled { enabled: bool },
    RenderShopList { shops: Vec<ShopStatus> },
    RenderMarker { position: Position, label: String },
    Notify { message: String },
    Log { message: String },
}

impl Effect {
    pub fn funds(state: &EconomyState) -> Self {
        Effect::SetFunds {
            amount: state.funds,
        }
    }

    pub fn selection(state: &EconomyState) -> Self {
        Effect::SetSelection {
            text: state.selection_text(),
        }
    }

    pub fn shop_list(state: &EconomyState, catalog: &Catalog) -> Self {
        Effect::RenderShopList {
            shops: state.shop_statuses(catalog),
        }
    }

    pub fn notify(message: impl Into<String>) -> Self {
        Effect::Notify {
            message: message.into(),
        }
    }

    pub fn log(message: impl Into<String>) -> Self {
        Effect::Log {
            message: message.into(),
        }
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, Effect::Notify { .. })
    }
}

/// Effects in application order, as handed across the wasm boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct EffectBatch {
    pub effects: Vec<Effect>,
}

impl EffectBatch {
    pub fn notifications(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Notify { message } => Some(message.as_str()),
            _ => None,
        })
    }
}

impl From<Vec<Effect>> for EffectBatch {
    fn from(effects: Vec<Effect>) -> Self {
        Self { effects }
    }
}

/// Full UI refresh for a freshly loaded page
pub fn initial_effects(state: &EconomyState, catalog: &Catalog) -> Vec<Effect> {
    vec![
        Effect::funds(state),
        Effect::selection(state),
        Effect::SetBuildEnabled {
            enabled: state.pending_selection.is_some(),
        },
        Effect::shop_list(state, catalog),
    ]
}
