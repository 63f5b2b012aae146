// Player-driven operations: picking a map location and building a shop there

use crate::catalog::Catalog;
use crate::effects::Effect;
use crate::error::BuildError;
use crate::shop::Shop;
use crate::state::EconomyState;
use crate::types::{Position, ShopId};

/// Record a map click as the pending build site. Replaces any earlier selection.
pub fn select_position(state: &mut EconomyState, position: Position) -> Vec<Effect> {
    state.pending_selection = Some(position);

    vec![
        Effect::SetBuildEnabled { enabled: true },
        Effect::SetSelection {
            text: Some(position.display()),
        },
    ]
}

/// Build a shop at the pending selection.
///
/// On error the state is untouched. On success the store cost is charged, a
/// shop with zero stock of every product is appended, and the selection is
/// consumed.
pub fn request_build(
    state: &mut EconomyState,
    catalog: &Catalog,
    marker_label: &str,
) -> Result<(ShopId, Vec<Effect>), BuildError> {
    let position = state.pending_selection.ok_or(BuildError::NoSelection)?;

    if !state.can_afford(state.store_cost) {
        return Err(BuildError::InsufficientFunds {
            funds: state.funds,
            cost: state.store_cost,
        });
    }

    state.funds -= state.store_cost;

    let shop_id = state.next_shop_id();
    state.shops.push(Shop::new(shop_id, position, catalog));
    state.pending_selection = None;

    #[cfg(feature = "instrument")]
    tracing::info!(
        target: "build",
        day = state.day,
        shop_id = shop_id.0,
        lat = position.lat,
        lng = position.lng,
        cost = state.store_cost,
        funds_after = state.funds,
    );

    let effects = vec![
        Effect::RenderMarker {
            position,
            label: marker_label.to_string(),
        },
        Effect::funds(state),
        Effect::SetSelection { text: None },
        Effect::SetBuildEnabled { enabled: false },
        Effect::shop_list(state, catalog),
    ];

    Ok((shop_id, effects))
}
