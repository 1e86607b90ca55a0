//! # Page Module
//!
//! The DOM side of the controller. [`Page`] owns handles to the window and
//! document and reads form state, wires event listeners, schedules timers
//! and writes results back into the page. All decisions are delegated to the
//! pure modules ([`crate::pricing`], [`crate::file_info`],
//! [`crate::animation`]); this module only moves values in and out of the DOM.
//!
//! Every method returns `Result<_, ControllerError>`. A missing element is
//! not an error: the affected behaviour is skipped and reported as
//! `Ok(false)` / `Ok(None)` / `Ok(0)`.
//!
//! Listeners stay attached for the lifetime of the page, so their closures
//! are handed to the browser with `forget`.

use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, DragEvent, Element, Event, File, FileList, HtmlInputElement, Window};

use crate::animation::stagger_delays;
use crate::numeric::parse_int_prefix;
use crate::pricing;
use crate::schema::{
    ControllerError, ControllerOptions, FileInfo, PriceTable, PricingInputs, PrintSide, PrintType,
    Quote,
};

/// Events whose default handling is suppressed on the drop zone.
const DRAG_EVENTS: [&str; 4] = ["dragenter", "dragover", "dragleave", "drop"];

#[derive(Clone)]
pub struct Page {
    window: Window,
    document: Document,
    options: Rc<ControllerOptions>,
}

impl Page {
    /// Binds to the global window and its document.
    pub fn current(options: Rc<ControllerOptions>) -> Result<Self, ControllerError> {
        let window = web_sys::window().ok_or(ControllerError::NoWindow)?;
        let document = window.document().ok_or(ControllerError::NoDocument)?;
        Ok(Self {
            window,
            document,
            options,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    // ---- entrance animation ----

    /// Schedules the animated class on every card, one timer per card,
    /// `index * stagger_ms` apart. Returns the number of cards scheduled.
    pub fn animate_cards(&self) -> Result<usize, ControllerError> {
        let cards = self.document.query_selector_all(&self.options.card_selector)?;
        let delays = stagger_delays(cards.length() as usize, self.options.stagger_ms);
        let mut scheduled = 0;

        for (index, delay) in delays.into_iter().enumerate() {
            let Some(card) = cards
                .get(index as u32)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let class = self.options.animate_class.clone();
            let reveal = Closure::once_into_js(move || {
                let _ = card.class_list().add_1(&class);
            });
            self.window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    reveal.unchecked_ref::<Function>(),
                    delay,
                )?;
            scheduled += 1;
        }

        console_debug!("scheduled entrance animation for {} card(s)", scheduled);
        Ok(scheduled)
    }

    /// Runs [`Page::animate_cards`] once the document is parsed: right away
    /// when it already is, otherwise on `DOMContentLoaded`.
    pub fn animate_when_ready(&self) -> Result<(), ControllerError> {
        self.animate_for_state(&self.document.ready_state())
    }

    /// [`Page::animate_when_ready`] for a given `readyState` value.
    pub fn animate_for_state(&self, ready_state: &str) -> Result<(), ControllerError> {
        if ready_state != "loading" {
            self.animate_cards()?;
            return Ok(());
        }

        let page = self.clone();
        let on_ready = Closure::once_into_js(move || {
            if let Err(err) = page.animate_cards() {
                console_warn!("card animation skipped: {}", err);
            }
        });
        self.document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.unchecked_ref::<Function>(),
        )?;
        Ok(())
    }

    // ---- upload ----

    pub fn upload_area(&self) -> Result<Option<Element>, ControllerError> {
        Ok(self
            .document
            .query_selector(&self.options.upload_area_selector)?)
    }

    pub fn file_input(&self) -> Result<Option<HtmlInputElement>, ControllerError> {
        Ok(self
            .document
            .query_selector(&self.options.file_input_selector)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok()))
    }

    /// Wires drag and drop on the upload area. Returns `false` when the page
    /// has no upload area.
    pub fn init_file_upload(&self) -> Result<bool, ControllerError> {
        let Some(zone) = self.upload_area()? else {
            console_debug!(
                "no upload area matches {}; drag and drop disabled",
                self.options.upload_area_selector
            );
            return Ok(false);
        };

        // keep the browser from opening the dropped file
        let suppress = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            event.prevent_default();
            event.stop_propagation();
        });
        for name in DRAG_EVENTS {
            zone.add_event_listener_with_callback(name, suppress.as_ref().unchecked_ref())?;
        }
        suppress.forget();

        let target = zone.clone();
        let class = self.options.drag_active_class.clone();
        let activate = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = target.class_list().add_1(&class);
        });
        for name in ["dragenter", "dragover"] {
            zone.add_event_listener_with_callback(name, activate.as_ref().unchecked_ref())?;
        }
        activate.forget();

        let target = zone.clone();
        let class = self.options.drag_active_class.clone();
        let deactivate = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let _ = target.class_list().remove_1(&class);
        });
        for name in ["dragleave", "drop"] {
            zone.add_event_listener_with_callback(name, deactivate.as_ref().unchecked_ref())?;
        }
        deactivate.forget();

        let page = self.clone();
        let on_drop = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Err(err) = page.handle_drop(&event) {
                console_warn!("dropped files not applied: {}", err);
            }
        });
        zone.add_event_listener_with_callback("drop", on_drop.as_ref().unchecked_ref())?;
        on_drop.forget();

        console_debug!("drag and drop enabled on {}", self.options.upload_area_selector);
        Ok(true)
    }

    /// Shows the picker's first file whenever the picker selection changes.
    pub fn init_file_picker(&self) -> Result<bool, ControllerError> {
        let Some(input) = self.file_input()? else {
            return Ok(false);
        };

        let page = self.clone();
        let source = input.clone();
        let on_change = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let file = source.files().and_then(|files| files.get(0));
            if let Err(err) = page.render_file_info(file.as_ref()) {
                console_warn!("file info not updated: {}", err);
            }
        });
        input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();
        Ok(true)
    }

    /// Applies the files carried by a drop event. Events without a file
    /// list are ignored. Returns the number of files handed to the picker.
    pub fn handle_drop(&self, event: &Event) -> Result<usize, ControllerError> {
        let Some(files) = event
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files())
        else {
            return Ok(0);
        };
        self.accept_files(&files)
    }

    /// Replaces the picker's selection with `files` and shows the first one.
    ///
    /// Every file goes to the picker so the form submits all of them; only
    /// the first is described in the file info region.
    pub fn accept_files(&self, files: &FileList) -> Result<usize, ControllerError> {
        let Some(input) = self.file_input()? else {
            return Ok(0);
        };
        input.set_files(Some(files));

        let count = files.length() as usize;
        console_debug!("{} file(s) dropped", count);
        self.render_file_info(files.get(0).as_ref())?;
        Ok(count)
    }

    /// Writes the file name and size into the file info region.
    ///
    /// The name is inserted as text, never parsed as markup. Returns `false`
    /// when there is no file or no region.
    pub fn render_file_info(&self, file: Option<&File>) -> Result<bool, ControllerError> {
        let Some(target) = self.document.get_element_by_id(&self.options.file_info_id) else {
            return Ok(false);
        };
        let Some(file) = file else {
            return Ok(false);
        };

        let info = FileInfo::new(file.name(), file.size());
        target.set_text_content(None);
        for (label, value) in info.fields() {
            let line = self.document.create_element("p")?;
            let strong = self.document.create_element("strong")?;
            strong.set_text_content(Some(label));
            line.append_with_node_1(&strong)?;
            line.append_with_str_1(&format!(" {}", value))?;
            target.append_with_node_1(&line)?;
        }
        console_debug!("{}", info.lines().join(", "));
        Ok(true)
    }

    // ---- pricing ----

    fn input_value(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlInputElement>()
            .ok()
            .map(|input| input.value())
    }

    fn checked_value(&self, name: &str) -> Result<Option<String>, ControllerError> {
        let selector = format!("input[name=\"{}\"]:checked", name);
        Ok(self
            .document
            .query_selector(&selector)?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value()))
    }

    /// Reads the current form state. Unreadable numbers fall back to their
    /// defaults (0 pages, 1 copy, 1 page per sheet).
    pub fn read_pricing_inputs(&self) -> Result<PricingInputs, ControllerError> {
        let o = &self.options;

        let pages = self
            .input_value(&o.pages_input_id)
            .and_then(|v| parse_int_prefix(&v))
            .map(|p| p.max(0) as u64)
            .unwrap_or(0);

        Ok(PricingInputs {
            pages,
            paper_size: self.checked_value(&o.paper_size_field)?,
            color_type: self.checked_value(&o.color_type_field)?,
            print_side: self
                .checked_value(&o.print_side_field)?
                .map(|v| PrintSide::from_form(&v)),
            copies: positive_u32(self.input_value(&o.copies_input_id)).unwrap_or(1),
            pages_per_sheet: positive_u32(self.checked_value(&o.pages_per_sheet_field)?)
                .unwrap_or(1),
            print_type: self
                .checked_value(&o.print_type_field)?
                .map(|v| PrintType::from_form(&v))
                .unwrap_or_default(),
        })
    }

    /// Rates carried by the price element: the JSON table attribute when it
    /// parses, otherwise the single `data-{key}` attribute.
    pub fn read_price_table(&self, display: &Element, key: &str) -> PriceTable {
        if let Some(json) = display.get_attribute(&self.options.price_table_attribute) {
            match PriceTable::from_json(&json) {
                Ok(table) => return table,
                Err(err) => console_warn!(
                    "ignoring {} attribute: {}",
                    self.options.price_table_attribute,
                    err
                ),
            }
        }

        let mut table = PriceTable::new();
        if let Some(raw) = display.get_attribute(&format!("data-{}", key)) {
            table.insert_text(key, raw);
        }
        table
    }

    /// Recomputes the price from the form and writes it into the price
    /// element. `Ok(None)` when the page has no price element.
    pub fn calculate_price(&self) -> Result<Option<Quote>, ControllerError> {
        let inputs = self.read_pricing_inputs()?;
        let Some(display) = self
            .document
            .get_element_by_id(&self.options.price_display_id)
        else {
            return Ok(None);
        };

        let table = self.read_price_table(&display, &inputs.rate_key());
        let quote = pricing::quote(&inputs, &table);
        let text = quote.display(&self.options.currency_symbol);
        display.set_text_content(Some(&text));

        console_debug!(
            "price {} = {} x {} ({})",
            text,
            quote.rate,
            quote.billed_units,
            quote.key
        );
        Ok(Some(quote))
    }
}

fn positive_u32(raw: Option<String>) -> Option<u32> {
    raw.and_then(|v| parse_int_prefix(&v))
        .filter(|n| *n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
}
