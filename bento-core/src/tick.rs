use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::catalog::Catalog;
use crate::effects::Effect;
use crate::restock::RestockOrder;
use crate::state::EconomyState;
use crate::types::Money;

// === REPORT ===

/// Outcome of one tick, for hosts and tests that want numbers rather than messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct TickReport {
    pub day: u64,
    pub product: String,
    pub restock_amount: u32,
    /// False when the configured product is not in the catalog
    pub restock_product_known: bool,
    pub restock_spent: Money,
    pub shops_restocked: u32,
    pub shops_skipped: u32,
    pub units_sold: u64,
    pub income: Money,
    pub funds_before: Money,
    pub funds_after: Money,
}

#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub report: TickReport,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestockTotals {
    pub product_known: bool,
    pub spent: Money,
    pub restocked: u32,
    pub skipped: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleTotals {
    pub income: Money,
    pub units_sold: u64,
}

// === PHASES ===

/// Restock every shop with the ordered product, in build order.
///
/// Each shop is charged `unit_cost * amount` only if the current balance covers
/// it; otherwise that shop gets nothing this tick. No partial fills.
pub fn run_restock_phase(
    state: &mut EconomyState,
    catalog: &Catalog,
    order: &RestockOrder,
) -> RestockTotals {
    let day = state.day;
    let EconomyState { funds, shops, .. } = state;

    let Some(product) = catalog.get(order.product.as_str()) else {
        #[cfg(feature = "instrument")]
        tracing::warn!(
            target: "restock_config",
            day = day,
            product = order.product.as_str(),
            "unknown product; restock phase skipped"
        );
        return RestockTotals {
            product_known: false,
            skipped: shops.len() as u32,
            ..Default::default()
        };
    };

    // Same price for every shop this tick; overflow means nobody can afford it.
    let cost = product.unit_cost.checked_mul(order.amount as Money);

    let mut totals = RestockTotals {
        product_known: true,
        ..Default::default()
    };

    for shop in shops.iter_mut() {
        let restocked = match cost {
            Some(cost) if *funds >= cost => {
                if shop.inventory.add(&product.key, order.amount).is_some() {
                    *funds -= cost;
                    totals.spent += cost;
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        if restocked {
            totals.restocked += 1;
        } else {
            totals.skipped += 1;
        }

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "restock",
            day = day,
            shop_id = shop.id.0,
            product = product.key.as_str(),
            amount = order.amount,
            cost = if restocked { cost.unwrap_or(0) } else { 0 },
            restocked = restocked,
        );
    }

    #[cfg(not(feature = "instrument"))]
    let _ = day;

    totals
}

/// Sell at most one unit of each product at each shop.
///
/// Shops are visited in build order and products in catalog order. Income is
/// credited in one step after every shop has been visited.
pub fn run_sell_phase(state: &mut EconomyState, catalog: &Catalog) -> SaleTotals {
    let mut totals = SaleTotals::default();

    for shop in state.shops.iter_mut() {
        for product in catalog.iter() {
            if !shop.inventory.take_one(product.key.as_str()) {
                continue;
            }
            totals.income = totals.income.saturating_add(product.sale_price);
            totals.units_sold += 1;

            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "sale",
                day = state.day,
                shop_id = shop.id.0,
                product = product.key.as_str(),
                price = product.sale_price,
            );
        }
    }

    if totals.income > 0 {
        state.funds = state.funds.saturating_add(totals.income);
    }

    totals
}

// === FULL TICK ===

/// Run one day: restock phase, then sell phase, then UI refresh commands.
pub fn run_tick(state: &mut EconomyState, catalog: &Catalog, order: &RestockOrder) -> TickOutcome {
    state.day += 1;
    let funds_before = state.funds;

    // 1. RESTOCK PHASE
    let restock = run_restock_phase(state, catalog, order);

    // 2. SELL PHASE
    let sales = run_sell_phase(state, catalog);

    let report = TickReport {
        day: state.day,
        product: order.product.to_string(),
        restock_amount: order.amount,
        restock_product_known: restock.product_known,
        restock_spent: restock.spent,
        shops_restocked: restock.restocked,
        shops_skipped: restock.skipped,
        units_sold: sales.units_sold,
        income: sales.income,
        funds_before,
        funds_after: state.funds,
    };

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "tick",
        day = report.day,
        shops = state.shops.len() as u64,
        restock_spent = report.restock_spent,
        shops_restocked = report.shops_restocked,
        shops_skipped = report.shops_skipped,
        units_sold = report.units_sold,
        income = report.income,
        funds_before = report.funds_before,
        funds_after = report.funds_after,
    );

    let effects = vec![
        Effect::log(restock_message(&report, catalog)),
        Effect::funds(state),
        Effect::shop_list(state, catalog),
        Effect::notify(day_summary_message(&report)),
    ];

    TickOutcome { report, effects }
}

fn restock_message(report: &TickReport, catalog: &Catalog) -> String {
    match catalog.get(&report.product) {
        Some(product) => format!(
            "Restocked {} x {} at {} of {} shops. Total cost: {}",
            report.restock_amount,
            product.label,
            report.shops_restocked,
            report.shops_restocked + report.shops_skipped,
            report.restock_spent,
        ),
        None => format!("Restock skipped: unknown product '{}'", report.product),
    }
}

fn day_summary_message(report: &TickReport) -> String {
    if report.income > 0 {
        format!(
            "Day {} complete! Sales of {} added to funds.",
            report.day, report.income
        )
    } else {
        format!("Day {} complete! No sales: not enough stock.", report.day)
    }
}
