//! Host ports: the browser services controllers depend on.
//!
//! Controllers never touch `web-sys` directly. The web runtime implements these
//! traits over the real browser APIs and the native runtime implements them
//! in memory, so the same controller code runs in both.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use foldhash::HashMap;

use crate::app_core::errors::{ClipboardError, StorageError};

/// Per-origin string key-value storage (`window.localStorage`).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Reads `key`, folding backend failures into "absent".
///
/// Every persisted preference has a documented default, so a broken store is
/// handled exactly like an empty one.
pub fn read_or_absent<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(key, %err, "storage read failed; using default");
            None
        }
    }
}

/// Writes `key`, logging instead of failing. The visual change still happens
/// when the preference cannot be saved.
pub fn write_or_log<S: KeyValueStore + ?Sized>(store: &S, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        tracing::warn!(key, %err, "could not persist preference");
    }
}

/// One-shot timers on the host event loop (`setTimeout` / `clearTimeout`).
pub trait Timers {
    type Handle;

    /// Runs `task` once after `delay`. Returns `None` when the host refused
    /// to schedule it, in which case `task` is dropped without running.
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<Self::Handle>;

    /// Cancels a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Per-timer host resources (callbacks, native ids) kept alive until the
/// timer fires or is cancelled, keyed by the handle given to callers.
pub struct TimerSlots<T> {
    next_key: Cell<u64>,
    slots: RefCell<HashMap<u64, T>>,
}

impl<T> TimerSlots<T> {
    pub fn new() -> Self {
        Self {
            next_key: Cell::new(0),
            slots: RefCell::new(HashMap::default()),
        }
    }

    /// A fresh key, known before its resource exists.
    pub fn reserve(&self) -> u64 {
        let key = self.next_key.get();
        self.next_key.set(key + 1);
        key
    }

    pub fn fill(&self, key: u64, resource: T) {
        self.slots.borrow_mut().insert(key, resource);
    }

    /// Removes and returns the resource for `key`; `None` once taken.
    pub fn take(&self, key: u64) -> Option<T> {
        self.slots.borrow_mut().remove(&key)
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for TimerSlots<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Completion callback for an asynchronous clipboard write.
pub type ClipboardDone = Box<dyn FnOnce(Result<(), ClipboardError>)>;

/// Asynchronous plain-text clipboard.
///
/// `done` runs exactly once, after the write settles. It may run long after
/// `write_text` has returned.
pub trait Clipboard {
    fn write_text(&self, text: String, done: ClipboardDone);
}

/// Blocking user-visible notification (`window.alert`).
pub trait Notifier {
    fn alert(&self, message: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_slots_release_on_take() {
        let slots = TimerSlots::new();
        let first = slots.reserve();
        let second = slots.reserve();
        assert_ne!(first, second);

        slots.fill(first, Rc::new("fired"));
        slots.fill(second, Rc::new("cancelled"));
        assert_eq!(slots.len(), 2);

        let fired = slots.take(first).unwrap();
        assert_eq!(Rc::strong_count(&fired), 1);
        assert!(slots.take(first).is_none());

        assert!(slots.take(second).is_some());
        assert!(slots.is_empty());
    }

    #[test]
    fn reserved_but_unfilled_key_holds_nothing() {
        let slots: TimerSlots<String> = TimerSlots::new();
        let key = slots.reserve();
        assert!(slots.take(key).is_none());
        assert!(slots.is_empty());
    }
}
