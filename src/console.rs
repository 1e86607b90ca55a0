//! Logging to the browser console.
//!
//! Off `wasm32` the messages are formatted and dropped, so the pure modules
//! stay usable in native unit tests.

macro_rules! console_debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::debug_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        let _ = format_args!($($arg)*);
    }};
}

macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(&format!($($arg)*)));
        #[cfg(not(target_arch = "wasm32"))]
        let _ = format_args!($($arg)*);
    }};
}
