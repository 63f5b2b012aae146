// Session: one player's economy plus the configuration it was built from

use crate::cadence::Cadence;
use crate::catalog::Catalog;
use crate::config::EconomyConfig;
use crate::construction::{request_build, select_position};
use crate::effects::{Effect, initial_effects};
use crate::error::ConfigError;
use crate::restock::RestockInput;
use crate::state::{EconomySnapshot, EconomyState};
use crate::tick::{TickOutcome, TickReport, run_tick};
use crate::types::Position;

/// Owns the economy state and routes host events to the operations.
///
/// Every operation returns the effects the host should apply. Build failures
/// come back as a `Notify` effect rather than an error.
#[derive(Debug, Clone)]
pub struct Session {
    state: EconomyState,
    catalog: Catalog,
    config: EconomyConfig,
    cadence: Cadence,
    last_report: Option<TickReport>,
}

impl Session {
    pub fn new(config: EconomyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = config.catalog()?;

        Ok(Self {
            state: EconomyState::from_config(&config),
            catalog,
            cadence: Cadence::new(config.tick_interval_ms),
            config,
            last_report: None,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::new(EconomyConfig::from_toml_str(text)?)
    }

    pub fn state(&self) -> &EconomyState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn snapshot(&self) -> EconomySnapshot {
        self.state.snapshot(&self.catalog)
    }

    pub fn initial_effects(&self) -> Vec<Effect> {
        initial_effects(&self.state, &self.catalog)
    }

    // === Player Actions ===

    pub fn select_position(&mut self, position: Position) -> Vec<Effect> {
        select_position(&mut self.state, position)
    }

    pub fn request_build(&mut self) -> Vec<Effect> {
        match request_build(&mut self.state, &self.catalog, &self.config.shop_label) {
            Ok((_, effects)) => effects,
            Err(err) => {
                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "build_refused",
                    day = self.state.day,
                    funds = self.state.funds,
                    reason = %err,
                );
                vec![Effect::notify(err.to_string())]
            }
        }
    }

    // === Ticks ===

    /// Run a tick immediately. `None` if another tick is still in flight.
    pub fn tick(&mut self, input: &RestockInput) -> Option<TickOutcome> {
        if !self.cadence.begin_tick() {
            return None;
        }
        Some(self.complete_tick(input))
    }

    /// Check the clock. On `true` the tick slot is held and the caller must
    /// follow up with `complete_tick` or `abandon_tick`.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.cadence.is_in_flight() {
            return false;
        }
        self.cadence.poll(now_ms) && self.cadence.begin_tick()
    }

    /// Run the tick claimed by `poll` (or `tick`) and release the slot.
    pub fn complete_tick(&mut self, input: &RestockInput) -> TickOutcome {
        let order = input.resolve();
        let outcome = run_tick(&mut self.state, &self.catalog, &order);
        self.last_report = Some(outcome.report.clone());
        self.cadence.finish_tick();
        outcome
    }

    /// Release a slot claimed by `poll` without ticking (e.g. the host failed
    /// to read its restock settings).
    pub fn abandon_tick(&mut self) {
        self.cadence.finish_tick();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: EconomyState::default(),
            catalog: Catalog::bento(),
            cadence: Cadence::new(crate::config::DEFAULT_TICK_INTERVAL_MS),
            config: EconomyConfig::default(),
            last_report: None,
        }
    }
}
