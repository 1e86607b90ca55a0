//! # Price Calculation
//!
//! Derives the displayed order price from the form state and the shop's
//! price table. Everything here is pure: the same inputs always give the
//! same quote, and nothing in this module touches the page.
//!
//! ## Sheet pipeline
//!
//! The page count is turned into billed units in four steps, each of which
//! leaves the count unchanged at its default setting:
//!
//! 1. print type: odd pages `ceil(p / 2)`, even pages `floor(p / 2)`
//! 2. pages per sheet: `ceil(p / n)`
//! 3. double sided: `ceil(s / 2)`
//! 4. copies: `s * copies`
//!
//! The total is `rate * billed_units`, where the rate is looked up under
//! `"{paper_size}_{color_type}"` and defaults to 0.

use crate::numeric::to_fixed_2;
use crate::schema::{PriceTable, PricingInputs, PrintSide, PrintType, Quote};

/// Pages left after dropping the ones the print type excludes.
pub fn selected_pages(pages: u64, print_type: PrintType) -> u64 {
    match print_type {
        PrintType::All => pages,
        PrintType::Odd => pages.div_ceil(2),
        PrintType::Even => pages / 2,
    }
}

/// Sheet faces needed when `pages_per_sheet` pages share a face.
pub fn sheets_after_n_up(pages: u64, pages_per_sheet: u32) -> u64 {
    pages.div_ceil(u64::from(pages_per_sheet.max(1)))
}

/// Billed sheets for one copy given the print side.
///
/// ```ignore
/// assert_eq!(sheets_for_side(5, Some(PrintSide::Double)), 3);
/// assert_eq!(sheets_for_side(5, None), 5);
/// ```
pub fn sheets_for_side(sheets: u64, side: Option<PrintSide>) -> u64 {
    match side {
        Some(PrintSide::Double) => sheets.div_ceil(2),
        _ => sheets,
    }
}

/// Units the per page rate is multiplied by.
pub fn billed_units(inputs: &PricingInputs) -> u64 {
    let pages = selected_pages(inputs.pages, inputs.print_type);
    let sheets = sheets_after_n_up(pages, inputs.pages_per_sheet);
    let per_copy = sheets_for_side(sheets, inputs.print_side);
    per_copy.saturating_mul(u64::from(inputs.copies.max(1)))
}

/// Computes the quote for the given form state.
///
/// Never fails: an unknown paper/color combination or an unreadable rate
/// prices at 0.
pub fn quote(inputs: &PricingInputs, table: &PriceTable) -> Quote {
    let key = inputs.rate_key();
    let rate = table.rate(&key);
    let billed_units = billed_units(inputs);
    let total = rate * billed_units as f64;
    Quote {
        key,
        rate,
        billed_units,
        total,
    }
}

/// Renders an amount as `"<symbol><amount with two decimals>"`.
pub fn format_price(total: f64, currency_symbol: &str) -> String {
    format!("{}{}", currency_symbol, to_fixed_2(total))
}

impl Quote {
    pub fn display(&self, currency_symbol: &str) -> String {
        format_price(self.total, currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pages: u64, paper: &str, color: &str, side: Option<PrintSide>) -> PricingInputs {
        PricingInputs {
            pages,
            paper_size: Some(paper.into()),
            color_type: Some(color.into()),
            print_side: side,
            ..Default::default()
        }
    }

    #[test]
    fn test_double_sided_rounds_up() {
        for (pages, expected) in [(0, 0), (1, 1), (2, 1), (5, 3), (10, 5)] {
            let i = inputs(pages, "A4", "BW", Some(PrintSide::Double));
            assert_eq!(billed_units(&i), expected, "pages = {}", pages);
        }
    }

    #[test]
    fn test_single_or_unset_side_bills_every_page() {
        for pages in [0, 1, 5, 37] {
            assert_eq!(billed_units(&inputs(pages, "A4", "BW", Some(PrintSide::Single))), pages);
            assert_eq!(billed_units(&inputs(pages, "A4", "BW", None)), pages);
        }
    }

    #[test]
    fn test_end_to_end_double_sided_color() {
        let mut table = PriceTable::new();
        table.insert("A4_COLOR", 5.00);
        let q = quote(&inputs(10, "A4", "COLOR", Some(PrintSide::Double)), &table);
        assert_eq!(q.key, "A4_COLOR");
        assert_eq!(q.billed_units, 5);
        assert_eq!(q.total, 25.0);
        assert_eq!(q.display("₹"), "₹25.00");
    }

    #[test]
    fn test_missing_rate_prices_at_zero() {
        let mut table = PriceTable::new();
        table.insert("A4_BW", 1.00);
        let q = quote(&inputs(12, "A4", "COLOR", None), &table);
        assert_eq!(q.rate, 0.0);
        assert_eq!(q.billed_units, 12);
        assert_eq!(q.display("₹"), "₹0.00");
    }

    #[test]
    fn test_unselected_options_price_at_zero() {
        let q = quote(
            &PricingInputs {
                pages: 3,
                ..Default::default()
            },
            &PriceTable::shop_defaults(),
        );
        assert_eq!(q.key, "undefined_undefined");
        assert_eq!(q.display("₹"), "₹0.00");
    }

    #[test]
    fn test_text_rate_from_markup() {
        let mut table = PriceTable::new();
        table.insert_text("A3_BW", "2.50");
        let q = quote(&inputs(3, "A3", "BW", None), &table);
        assert_eq!(q.display("₹"), "₹7.50");
    }

    #[test]
    fn test_quote_is_idempotent() {
        let table = PriceTable::shop_defaults();
        let i = inputs(7, "A3", "COLOR", Some(PrintSide::Double));
        assert_eq!(quote(&i, &table), quote(&i, &table));
        assert_eq!(quote(&i, &table).total, 40.0);
    }

    #[test]
    fn test_sheet_pipeline() {
        let base = inputs(9, "A4", "BW", Some(PrintSide::Double));

        let odd = PricingInputs {
            print_type: PrintType::Odd,
            ..base.clone()
        };
        // 9 -> 5 odd pages -> 3 double sided sheets
        assert_eq!(billed_units(&odd), 3);

        let even = PricingInputs {
            print_type: PrintType::Even,
            ..base.clone()
        };
        // 9 -> 4 even pages -> 2 sheets
        assert_eq!(billed_units(&even), 2);

        let four_up = PricingInputs {
            pages_per_sheet: 4,
            ..base.clone()
        };
        // 9 -> 3 faces -> 2 sheets
        assert_eq!(billed_units(&four_up), 2);

        let copies = PricingInputs {
            copies: 3,
            ..base.clone()
        };
        assert_eq!(billed_units(&copies), 15);
    }

    #[test]
    fn test_zero_copies_and_zero_n_up_act_as_one() {
        let i = PricingInputs {
            copies: 0,
            pages_per_sheet: 0,
            ..inputs(6, "A4", "BW", None)
        };
        assert_eq!(billed_units(&i), 6);
    }

    #[test]
    fn test_fractional_rate_total_is_not_rounded_up() {
        let mut table = PriceTable::new();
        table.insert_text("A4_BW", "0.145");
        let q = quote(&inputs(5, "A4", "BW", None), &table);
        assert_eq!(q.display("₹"), "₹0.72");
        assert_eq!(format_price(1.115, "₹"), "₹1.11");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0, "₹"), "₹0.00");
        assert_eq!(format_price(12.346, "$"), "$12.35");
        assert_eq!(format_price(3.0, ""), "3.00");
    }
}
