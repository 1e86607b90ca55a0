//! Data structures and types for the print order page.
//!
//! This module defines the core types used throughout the controller,
//! including the error type, configuration options, pricing inputs,
//! the price table supplied by the host page and the resulting quote.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::numeric::parse_float_prefix;

/// Errors that can occur while driving the page.
///
/// None of these reach the user. The exported entry points log them and
/// carry on, leaving the affected part of the page untouched.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// No global `window` object (not running in a browser).
    #[error("No window available")]
    NoWindow,
    /// The window has no document attached.
    #[error("No document available")]
    NoDocument,
    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Js(String),
    /// A JSON payload (options, price table, pricing inputs) did not parse.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<JsValue> for ControllerError {
    fn from(value: JsValue) -> Self {
        ControllerError::Js(format!("{:?}", value))
    }
}

/// Print side as selected on the order form.
///
/// Only `DOUBLE` changes the billed units; any other form value,
/// including one this crate does not know, behaves as `SINGLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrintSide {
    #[default]
    Single,
    Double,
}

impl From<String> for PrintSide {
    fn from(value: String) -> Self {
        PrintSide::from_form(&value)
    }
}

impl From<PrintSide> for String {
    fn from(value: PrintSide) -> Self {
        value.as_form().into()
    }
}

impl PrintSide {
    pub fn from_form(value: &str) -> Self {
        match value {
            "DOUBLE" => PrintSide::Double,
            _ => PrintSide::Single,
        }
    }

    pub fn as_form(self) -> &'static str {
        match self {
            PrintSide::Single => "SINGLE",
            PrintSide::Double => "DOUBLE",
        }
    }
}

/// Which pages of the document get printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrintType {
    #[default]
    All,
    Odd,
    Even,
}

impl From<String> for PrintType {
    fn from(value: String) -> Self {
        PrintType::from_form(&value)
    }
}

impl From<PrintType> for String {
    fn from(value: PrintType) -> Self {
        value.as_form().into()
    }
}

impl PrintType {
    pub fn from_form(value: &str) -> Self {
        match value {
            "ODD" => PrintType::Odd,
            "EVEN" => PrintType::Even,
            _ => PrintType::All,
        }
    }

    pub fn as_form(self) -> &'static str {
        match self {
            PrintType::All => "ALL",
            PrintType::Odd => "ODD",
            PrintType::Even => "EVEN",
        }
    }
}

/// Form state the price is derived from.
///
/// `paper_size` and `color_type` are kept exactly as the form reports them;
/// they are only ever used to build the price table key.
///
/// # Examples
///
/// ```json
/// { "pages": 10, "paper_size": "A4", "color_type": "COLOR", "print_side": "DOUBLE" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingInputs {
    /// Number of pages in the uploaded document.
    pub pages: u64,
    /// Checked paper size, if any (e.g. "A4", "A3").
    pub paper_size: Option<String>,
    /// Checked color type, if any (e.g. "BW", "COLOR").
    pub color_type: Option<String>,
    /// Checked print side. Unset behaves as single sided.
    pub print_side: Option<PrintSide>,
    /// Number of copies. Zero is treated as one.
    pub copies: u32,
    /// Pages placed on one sheet face (1, 2, 4, 6 or 9). Zero is treated as one.
    pub pages_per_sheet: u32,
    /// Subset of pages to print.
    pub print_type: PrintType,
}

impl Default for PricingInputs {
    fn default() -> Self {
        Self {
            pages: 0,
            paper_size: None,
            color_type: None,
            print_side: None,
            copies: 1,
            pages_per_sheet: 1,
            print_type: PrintType::All,
        }
    }
}

impl PricingInputs {
    /// Price table key for the selected paper size and color type.
    ///
    /// An unselected part is spelled `undefined`, which never matches a
    /// real table entry.
    pub fn rate_key(&self) -> String {
        format!(
            "{}_{}",
            self.paper_size.as_deref().unwrap_or("undefined"),
            self.color_type.as_deref().unwrap_or("undefined")
        )
    }
}

/// A single rate as found in the host's data. The page embeds rates as
/// text, JSON callers usually send numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    /// Rate per billed unit. Text is read like `parseFloat`; anything that
    /// is not a finite number counts as 0.
    pub fn as_rate(&self) -> f64 {
        let rate = match self {
            RateValue::Number(n) => *n,
            RateValue::Text(t) => parse_float_prefix(t).unwrap_or(0.0),
        };
        if rate.is_finite() { rate } else { 0.0 }
    }
}

/// Per page rates keyed by `"{paper_size}_{color_type}"`.
///
/// Keys are case sensitive. A missing key prices at 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    rates: HashMap<String, RateValue>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default shop price list.
    pub fn shop_defaults() -> Self {
        let mut table = Self::new();
        table.insert("A4_BW", 1.00);
        table.insert("A4_COLOR", 5.00);
        table.insert("A3_BW", 2.00);
        table.insert("A3_COLOR", 10.00);
        table
    }

    pub fn from_json(json: &str) -> Result<Self, ControllerError> {
        serde_json::from_str(json).map_err(|e| ControllerError::InvalidJson(e.to_string()))
    }

    pub fn insert(&mut self, key: impl Into<String>, rate: f64) {
        self.rates.insert(key.into(), RateValue::Number(rate));
    }

    /// Insert a rate as the page markup carries it.
    pub fn insert_text(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.rates.insert(key.into(), RateValue::Text(raw.into()));
    }

    pub fn rate(&self, key: &str) -> f64 {
        self.rates.get(key).map(RateValue::as_rate).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// The result of a price calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Price table key that was looked up.
    pub key: String,
    /// Rate found for the key (0 when missing).
    pub rate: f64,
    /// Units the rate was multiplied by.
    pub billed_units: u64,
    /// `rate * billed_units`.
    pub total: f64,
}

/// Name and size of the currently selected file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    /// Size in bytes. Kept as `f64` because that is what `Blob.size` yields.
    pub size_bytes: f64,
}

/// Configuration for locating page elements and styling them.
///
/// Every field is optional in JSON; missing fields take the defaults below,
/// which match the markup rendered by the ordering site.
///
/// # Examples
///
/// Using the defaults:
/// ```json
/// {}
/// ```
///
/// Another currency and a slower stagger:
/// ```json
/// { "currency_symbol": "$", "stagger_ms": 150 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerOptions {
    /// Selector for the cards animated on load.
    pub card_selector: String,
    /// Class added to each card when its timer fires.
    pub animate_class: String,
    /// Delay between consecutive cards, in milliseconds.
    pub stagger_ms: u32,
    /// Selector for the drop zone.
    pub upload_area_selector: String,
    /// Class present on the drop zone while something is dragged over it.
    pub drag_active_class: String,
    /// Selector for the native file picker.
    pub file_input_selector: String,
    /// Id of the region showing the selected file.
    pub file_info_id: String,
    /// Id of the page count input.
    pub pages_input_id: String,
    /// Id of the copies input.
    pub copies_input_id: String,
    /// Radio group names.
    pub paper_size_field: String,
    pub color_type_field: String,
    pub print_side_field: String,
    pub pages_per_sheet_field: String,
    pub print_type_field: String,
    /// Id of the element the total is written into. It also carries the rates.
    pub price_display_id: String,
    /// Attribute on the price element holding the whole table as JSON.
    pub price_table_attribute: String,
    /// Prefix of the price amount.
    pub currency_symbol: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            card_selector: ".card".into(),
            animate_class: "animate-fade-in".into(),
            stagger_ms: 100,
            upload_area_selector: ".upload-area".into(),
            drag_active_class: "dragover".into(),
            file_input_selector: "input[type=\"file\"]".into(),
            file_info_id: "file-info".into(),
            pages_input_id: "pages".into(),
            copies_input_id: "copies".into(),
            paper_size_field: "paper_size".into(),
            color_type_field: "color_type".into(),
            print_side_field: "print_side".into(),
            pages_per_sheet_field: "pages_per_sheet".into(),
            print_type_field: "print_type".into(),
            price_display_id: "total-price".into(),
            price_table_attribute: "data-price-table".into(),
            currency_symbol: "₹".into(),
        }
    }
}

impl ControllerOptions {
    pub fn parse(json: &str) -> Result<Self, ControllerError> {
        serde_json::from_str(json).map_err(|e| ControllerError::InvalidJson(e.to_string()))
    }
}
