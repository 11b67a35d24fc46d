//! Async Clipboard API and `window.alert`.

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::Window;

use super::describe_js;
use crate::app_core::errors::ClipboardError;
use crate::app_core::host::{Clipboard, ClipboardDone, Notifier};

/// The async Clipboard API, looked up at call time. Insecure origins and old
/// engines have no `navigator.clipboard` at all.
pub struct NavigatorClipboard {
    window: Window,
}

impl NavigatorClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn write_fn(&self) -> Option<(JsValue, Function)> {
        let navigator = self.window.navigator();
        let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard")).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        let write = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((clipboard, write))
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: String, done: ClipboardDone) {
        let Some((clipboard, write)) = self.write_fn() else {
            done(Err(ClipboardError::Unavailable));
            return;
        };
        let returned = match write.call1(&clipboard, &JsValue::from_str(&text)) {
            Ok(value) => value,
            Err(err) => {
                done(Err(ClipboardError::Rejected(describe_js(&err))));
                return;
            }
        };
        let promise = Promise::resolve(&returned);
        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| ClipboardError::Rejected(describe_js(&err)));
            done(result);
        });
    }
}

/// `window.alert`.
pub struct WindowAlert {
    window: Window,
}

impl WindowAlert {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Notifier for WindowAlert {
    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            tracing::warn!(error = %describe_js(&err), %message, "alert failed");
        }
    }
}
