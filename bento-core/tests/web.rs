//! Browser-side checks for the wasm `Economy` handle.
//!
//! Run with `wasm-pack test --headless --firefox bento-core`.
#![cfg(target_arch = "wasm32")]

use bento_core::{Economy, QuantityInput, RestockInput};
use js_sys::Function;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn economy(config: &str) -> Economy {
    match Economy::from_config_toml(config) {
        Ok(economy) => economy,
        Err(_) => panic!("config rejected: {config}"),
    }
}

fn restock_callback(product: &str, quantity: &str) -> Function {
    Function::new_no_args(&format!(
        "return {{ product: '{product}', quantity: '{quantity}' }};"
    ))
}

#[wasm_bindgen_test]
fn poll_reads_restock_config_only_when_due() {
    let economy = economy("tick_interval_ms = 1000");
    economy.select_position(35.0, 139.0);
    economy.request_build();

    let callback = restock_callback("simple", "3");

    // First poll arms the clock
    let batch = economy.poll(0.0, &callback).unwrap();
    assert!(batch.effects.is_empty());
    assert_eq!(economy.day(), 0);

    let batch = economy.poll(1_000.0, &callback).unwrap();
    assert!(!batch.effects.is_empty());
    assert_eq!(economy.day(), 1);
    // 3 x 200 restock, one simple sold at 300
    assert_eq!(economy.funds(), 9_000 - 600 + 300);
}

#[wasm_bindgen_test]
fn failing_callback_releases_the_tick() {
    let economy = economy("tick_interval_ms = 10");
    let broken = Function::new_no_args("throw new Error('settings unavailable');");

    economy.poll(0.0, &broken).unwrap();
    assert!(economy.poll(10.0, &broken).is_err());
    assert_eq!(economy.day(), 0);

    let batch = economy.poll(20.0, &restock_callback("deluxe", "0")).unwrap();
    assert!(!batch.effects.is_empty());
    assert_eq!(economy.day(), 1);
}

#[wasm_bindgen_test]
fn last_report_is_undefined_before_first_tick() {
    let economy = Economy::new();
    assert_eq!(economy.last_report().unwrap(), JsValue::UNDEFINED);

    economy.tick(RestockInput::new("healthy", QuantityInput::Count(1.0)));
    assert!(economy.last_report().unwrap().is_object());
}
