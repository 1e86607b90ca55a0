//! # Assembly Module
//!
//! This module provides the WASM-exported functions the ordering page calls.
//! It is the bridge between the page's JavaScript and the Rust controller.
//!
//! ## Overview
//!
//! - `init_page`: animates the cards and wires the upload area and picker
//! - `calculate_price`: recomputes the total from the form (wire it to `input`/`change`)
//! - `update_file_info`: shows a file's name and size
//! - `quote_price`, `format_file_size`, `stagger_schedule`, `default_price_table`:
//!   the pure calculations, for callers that render on their own
//!
//! None of these throw. Problems are logged to the console and the page is
//! left as it was. Functions returning data use a JSON string, with an
//! `error` field on failure.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::File;

use crate::animation::stagger_delays;
use crate::file_info::format_size_mb;
use crate::page::Page;
use crate::pricing;
use crate::schema::{ControllerOptions, PriceTable, PricingInputs, Quote};

thread_local! {
    // options from the last `init_page`, reused by the later calls
    static ACTIVE_OPTIONS: RefCell<Rc<ControllerOptions>> =
        RefCell::new(Rc::new(ControllerOptions::default()));
}

fn active_options() -> Rc<ControllerOptions> {
    ACTIVE_OPTIONS.with(|slot| slot.borrow().clone())
}

fn quote_json(quote: &Quote, currency_symbol: &str) -> String {
    json!({
        "key": quote.key,
        "rate": quote.rate,
        "billed_units": quote.billed_units,
        "total": quote.total,
        "display": quote.display(currency_symbol),
    })
    .to_string()
}

/// Starts the controller on the current page.
///
/// # Parameters
///
/// * `options_json` - Optional JSON string matching `ControllerOptions`.
///                    Missing fields keep their defaults; malformed JSON is
///                    logged and the defaults are used.
///
/// # Example
///
/// ```javascript
/// import init, { init_page, calculate_price } from "./order_page_wasm.js";
///
/// await init();
/// init_page(JSON.stringify({ currency_symbol: "₹" }));
/// document.querySelector("form").addEventListener("input", () => calculate_price());
/// ```
///
/// Each behaviour is independent: a page without an upload area still gets
/// its card animation and vice versa.
#[wasm_bindgen]
pub fn init_page(options_json: Option<String>) {
    let options = match options_json.as_deref().map(ControllerOptions::parse).transpose() {
        Ok(parsed) => parsed.unwrap_or_default(),
        Err(err) => {
            console_warn!("using default page options: {}", err);
            ControllerOptions::default()
        }
    };
    let options = Rc::new(options);
    ACTIVE_OPTIONS.with(|slot| *slot.borrow_mut() = options.clone());

    let page = match Page::current(options) {
        Ok(page) => page,
        Err(err) => {
            console_warn!("page controller not started: {}", err);
            return;
        }
    };

    if let Err(err) = page.animate_when_ready() {
        console_warn!("card animation skipped: {}", err);
    }
    if let Err(err) = page.init_file_upload() {
        console_warn!("drag and drop not enabled: {}", err);
    }
    if let Err(err) = page.init_file_picker() {
        console_warn!("file picker not wired: {}", err);
    }
}

/// Recomputes the displayed total from the current form state.
///
/// # Returns
///
/// A JSON string `{key, rate, billed_units, total, display}` describing what
/// was written, or `null` when the page has no price element.
///
/// # Example
///
/// ```javascript
/// const quote = calculate_price();
/// if (quote) console.log(JSON.parse(quote).billed_units);
/// ```
#[wasm_bindgen]
pub fn calculate_price() -> JsValue {
    let options = active_options();
    let result = Page::current(options.clone()).and_then(|page| page.calculate_price());
    match result {
        Ok(Some(quote)) => JsValue::from_str(&quote_json(&quote, &options.currency_symbol)),
        Ok(None) => JsValue::NULL,
        Err(err) => {
            console_warn!("price not updated: {}", err);
            JsValue::NULL
        }
    }
}

/// Shows `file` in the file info region. Returns whether anything was
/// rendered.
#[wasm_bindgen]
pub fn update_file_info(file: Option<File>) -> bool {
    match Page::current(active_options()).and_then(|page| page.render_file_info(file.as_ref())) {
        Ok(rendered) => rendered,
        Err(err) => {
            console_warn!("file info not updated: {}", err);
            false
        }
    }
}

/// Prices an order without touching the page.
///
/// # Parameters
///
/// * `inputs_json` - JSON matching `PricingInputs`, e.g.
///                   `{"pages": 10, "paper_size": "A4", "color_type": "COLOR", "print_side": "DOUBLE"}`.
/// * `table_json` - Optional JSON object of rates keyed `"{paper_size}_{color_type}"`.
///                  Values may be numbers or numeric text. The shop's default
///                  price list is used when absent.
///
/// # Returns
///
/// A JSON string `{key, rate, billed_units, total, display}`, or
/// `{"error": ...}` when either argument is not valid JSON.
#[wasm_bindgen]
pub fn quote_price(inputs_json: &str, table_json: Option<String>) -> JsValue {
    let inputs: PricingInputs = match serde_json::from_str(inputs_json) {
        Ok(inputs) => inputs,
        Err(e) => {
            return JsValue::from_str(
                &json!({"error": format!("invalid pricing inputs: {}", e)}).to_string(),
            );
        }
    };
    let table = match table_json {
        Some(s) => match PriceTable::from_json(&s) {
            Ok(table) => table,
            Err(err) => {
                return JsValue::from_str(&json!({"error": err.to_string()}).to_string());
            }
        },
        None => PriceTable::shop_defaults(),
    };

    let quote = pricing::quote(&inputs, &table);
    JsValue::from_str(&quote_json(&quote, &active_options().currency_symbol))
}

/// Formats a byte count the way the file info region shows it, e.g. `"1.00 MB"`.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    format_size_mb(bytes)
}

/// Delays (ms) the entrance animation uses for `count` cards.
#[wasm_bindgen]
pub fn stagger_schedule(count: u32) -> Vec<i32> {
    stagger_delays(count as usize, active_options().stagger_ms)
}

/// The shop's default price list as a JSON string.
#[wasm_bindgen]
pub fn default_price_table() -> JsValue {
    match serde_json::to_string(&PriceTable::shop_defaults()) {
        Ok(s) => JsValue::from_str(&s),
        Err(_) => JsValue::from_str(&json!({"error":"serialization failed"}).to_string()),
    }
}
