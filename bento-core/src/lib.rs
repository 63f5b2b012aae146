use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod cadence;
pub mod catalog;
pub mod config;
pub mod construction;
pub mod effects;
pub mod error;
pub mod restock;
pub mod session;
pub mod shop;
pub mod state;
pub mod tick;
pub mod types;

pub use cadence::Cadence;
pub use catalog::{Catalog, ProductType, bento_products};
pub use config::{EconomyConfig, MapView, ProductConfig};
pub use construction::{request_build, select_position};
pub use effects::{Effect, EffectBatch, initial_effects};
pub use error::{BuildError, ConfigError};
pub use restock::{QuantityInput, RestockInput, RestockOrder, parse_quantity};
pub use session::Session;
pub use shop::{Inventory, Shop};
pub use state::{EconomySnapshot, EconomyState, InventoryLine, ShopStatus};
pub use tick::{TickOutcome, TickReport, run_restock_phase, run_sell_phase, run_tick};
pub use types::{Money, Position, ProductKey, Quantity, ShopId};

#[cfg(feature = "instrument")]
pub use instrument;

// ============================================================================
// WASM API - Economy
// ============================================================================

/// Browser-facing handle. The host wires map clicks, the build button and its
/// timer to these methods and applies the returned effects.
///
/// Methods take `&self` so the restock-config callback invoked from `poll` can
/// call back in; a tick requested from inside that callback is refused rather
/// than nested.
#[wasm_bindgen]
pub struct Economy {
    session: RefCell<Session>,
}

#[wasm_bindgen]
impl Economy {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            session: RefCell::new(Session::default()),
        }
    }

    /// Create an economy from a TOML configuration document
    #[wasm_bindgen]
    pub fn from_config_toml(text: &str) -> Result<Economy, JsError> {
        console_error_panic_hook::set_once();

        let session = Session::from_toml_str(text)?;
        Ok(Self {
            session: RefCell::new(session),
        })
    }

    /// Effects that paint the initial UI
    #[wasm_bindgen]
    pub fn initial_effects(&self) -> EffectBatch {
        self.session.borrow().initial_effects().into()
    }

    /// Map click handler
    #[wasm_bindgen]
    pub fn select_position(&self, lat: f64, lng: f64) -> EffectBatch {
        self.session
            .borrow_mut()
            .select_position(Position::new(lat, lng))
            .into()
    }

    /// Build button handler
    #[wasm_bindgen]
    pub fn request_build(&self) -> EffectBatch {
        self.session.borrow_mut().request_build().into()
    }

    /// Run one tick now with the given restock settings
    #[wasm_bindgen]
    pub fn tick(&self, restock: RestockInput) -> EffectBatch {
        match self.session.borrow_mut().tick(&restock) {
            Some(outcome) => outcome.effects.into(),
            None => vec![Effect::log("tick already in progress; skipped")].into(),
        }
    }

    /// Timer handler. Runs a tick only if one is due at `now_ms`, reading the
    /// restock settings from `get_restock_config` exactly once in that case.
    #[wasm_bindgen]
    pub fn poll(
        &self,
        now_ms: f64,
        get_restock_config: &js_sys::Function,
    ) -> Result<EffectBatch, JsValue> {
        // The borrow must end before calling back into JS
        let due = self.session.borrow_mut().poll(now_ms as u64);
        if !due {
            return Ok(EffectBatch::default());
        }

        let input = get_restock_config
            .call0(&JsValue::NULL)
            .and_then(|raw| serde_wasm_bindgen::from_value::<RestockInput>(raw).map_err(JsValue::from));

        let mut session = self.session.borrow_mut();
        match input {
            Ok(input) => Ok(session.complete_tick(&input).effects.into()),
            Err(err) => {
                session.abandon_tick();
                Err(err)
            }
        }
    }

    /// Numbers from the most recent tick, or `undefined` before the first one
    #[wasm_bindgen]
    pub fn last_report(&self) -> Result<JsValue, JsValue> {
        let session = self.session.borrow();
        Ok(serde_wasm_bindgen::to_value(&session.last_report())?)
    }

    /// Get a snapshot of the current state for rendering
    #[wasm_bindgen]
    pub fn snapshot(&self) -> EconomySnapshot {
        self.session.borrow().snapshot()
    }

    #[wasm_bindgen]
    pub fn snapshot_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.borrow().snapshot())?)
    }

    /// Initial centre and zoom for the host map
    #[wasm_bindgen]
    pub fn map_view(&self) -> MapView {
        self.session.borrow().config().map
    }

    /// Period the host timer should use
    #[wasm_bindgen]
    pub fn tick_interval_ms(&self) -> f64 {
        self.session.borrow().config().tick_interval_ms as f64
    }

    #[wasm_bindgen]
    pub fn funds(&self) -> i64 {
        self.session.borrow().state().funds
    }

    #[wasm_bindgen]
    pub fn day(&self) -> u64 {
        self.session.borrow().state().day
    }
}

impl Default for Economy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restock(product: &str, amount: f64) -> RestockInput {
        RestockInput::new(product, QuantityInput::Count(amount))
    }

    #[test]
    fn test_click_build_tick_flow() {
        let economy = Economy::new();

        let initial = economy.initial_effects();
        assert_eq!(initial.effects[0], Effect::SetFunds { amount: 10_000 });

        let selected = economy.select_position(35.6895, 139.6917);
        assert_eq!(selected.effects[0], Effect::SetBuildEnabled { enabled: true });

        let built = economy.request_build();
        assert_eq!(built.notifications().count(), 0);
        assert_eq!(economy.funds(), 9_000);

        let ticked = economy.tick(restock("deluxe", 2.0));
        assert_eq!(economy.day(), 1);
        // 2 x 400 restock, then one deluxe sold at 500
        assert_eq!(economy.funds(), 9_000 - 800 + 500);
        assert_eq!(
            ticked.notifications().collect::<Vec<_>>(),
            vec!["Day 1 complete! Sales of 500 added to funds."]
        );

        let snapshot = economy.snapshot();
        assert_eq!(snapshot.shops.len(), 1);
        assert_eq!(snapshot.shops[0].inventory[1].count, 1);
    }

    #[test]
    fn test_build_refusals_surface_as_notifications() {
        let economy = Economy::new();
        let batch = economy.request_build();
        assert_eq!(
            batch.notifications().collect::<Vec<_>>(),
            vec!["Click the map to choose a location first!"]
        );
    }

    #[test]
    fn test_host_settings_come_from_config() {
        let economy = Economy::new();
        assert_eq!(economy.tick_interval_ms(), 60_000.0);
        assert_eq!(economy.map_view().zoom, 10);
        assert_eq!(economy.map_view().center, Position::new(35.6895, 139.6917));
    }

    #[test]
    fn test_stock_sells_one_unit_per_day() {
        let economy = Economy::new();
        economy.select_position(1.0, 1.0);
        economy.request_build();

        // Stock up on simple bentos once (9 x 200 = 1800), then stop restocking
        economy.tick(restock("simple", 9.0));
        for _ in 0..11 {
            economy.tick(restock("simple", 0.0));
        }

        let snapshot = economy.snapshot();
        assert_eq!(snapshot.day, 12);
        assert_eq!(snapshot.shops[0].inventory[0].count, 0);
        // 9000 - 1800 + 9 * 300; the last three days sold nothing
        assert_eq!(economy.funds(), 9_900);
    }
}
