//! WebAssembly controller for the print order page.
//!
//! The pure modules (`pricing`, `file_info`, `animation`, `numeric`) hold
//! all the logic and run anywhere. `page` binds them to the DOM and
//! `assembly` exports the entry points the page's JavaScript calls.

#[macro_use]
mod console;

pub mod animation;
pub mod assembly;
pub mod file_info;
pub mod numeric;
pub mod page;
pub mod pricing;
pub mod schema;

pub use schema::{
    ControllerError, ControllerOptions, FileInfo, PriceTable, PricingInputs, PrintSide, PrintType,
    Quote,
};
