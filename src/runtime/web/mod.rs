//! Browser host: `web-sys` implementations of the core ports and the
//! functions exported to page scripts.

mod clipboard;
mod dom;
mod exports;
mod logging;
mod storage;
mod timers;

pub use clipboard::{NavigatorClipboard, WindowAlert};
pub use dom::{DomCopyButton, DomElement, DomIndexView, DomNavControl, DomRoot, LegacyLookup, ModernLookup};
pub use exports::*;
pub use storage::WebStorage;
pub use timers::WindowTimers;

use wasm_bindgen::{JsCast, JsValue};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}
