//! `setTimeout` timers that own their callbacks.

use std::rc::{Rc, Weak};
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use super::describe_js;
use crate::app_core::host::{TimerSlots, Timers};

struct Scheduled {
    timeout: i32,
    _callback: Closure<dyn FnMut()>,
}

/// `setTimeout`/`clearTimeout` on the page window. Each callback is dropped
/// when its timer fires or is cancelled.
pub struct WindowTimers {
    window: Window,
    slots: Rc<TimerSlots<Scheduled>>,
}

impl WindowTimers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            slots: Rc::new(TimerSlots::new()),
        }
    }
}

impl Timers for WindowTimers {
    type Handle = u64;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<u64> {
        let key = self.slots.reserve();
        let slots: Weak<TimerSlots<Scheduled>> = Rc::downgrade(&self.slots);
        let callback = Closure::once(move || {
            // wasm-bindgen defers freeing a closure dropped during its own call.
            let _own = slots.upgrade().and_then(|slots| slots.take(key));
            task();
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            millis,
        ) {
            Ok(timeout) => {
                self.slots.fill(
                    key,
                    Scheduled {
                        timeout,
                        _callback: callback,
                    },
                );
                Some(key)
            }
            Err(err) => {
                tracing::warn!(error = %describe_js(&err), "setTimeout failed");
                None
            }
        }
    }

    fn cancel(&self, key: u64) {
        if let Some(scheduled) = self.slots.take(key) {
            self.window.clear_timeout_with_handle(scheduled.timeout);
        }
    }
}
