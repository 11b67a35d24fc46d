//! In-memory services: storage, a virtual clock, a clipboard settled by hand
//! and a notifier that records alerts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use foldhash::HashMap;

use crate::app_core::errors::{ClipboardError, StorageError};
use crate::app_core::host::{Clipboard, ClipboardDone, KeyValueStore, Notifier, Timers};

/// `localStorage` stand-in. An unavailable store fails every call, like a
/// browser with storage disabled.
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    available: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: RefCell::new(HashMap::default()),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Seeds a value directly, bypassing availability.
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    /// All entries, sorted by key.
    pub fn snapshot(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .values
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.insert(key, value);
        Ok(())
    }
}

struct ScheduledTask {
    id: u64,
    due: Duration,
    task: Box<dyn FnOnce()>,
}

/// Virtual-clock timers. Nothing fires until [`ManualTimers::advance`].
#[derive(Default)]
pub struct ManualTimers {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    queue: RefCell<Vec<ScheduledTask>>,
    refusing: Cell<bool>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// While set, `schedule` fails like a host that rejects `setTimeout`.
    pub fn set_refusing(&self, refusing: bool) {
        self.refusing.set(refusing);
    }

    /// Number of scheduled tasks that have neither run nor been cancelled.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Moves the clock forward by `by`, running every task that falls due in
    /// deadline order. Tasks scheduled by a running task are honoured if they
    /// fall inside the same window.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut queue = self.queue.borrow_mut();
                let due = queue
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(idx, _)| idx);
                due.map(|idx| queue.remove(idx))
            };
            let Some(scheduled) = next else {
                break;
            };
            self.now.set(scheduled.due);
            (scheduled.task)();
        }
        self.now.set(target);
    }
}

impl Timers for ManualTimers {
    type Handle = u64;

    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Option<u64> {
        if self.refusing.get() {
            return None;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.queue.borrow_mut().push(ScheduledTask {
            id,
            due: self.now.get() + delay,
            task,
        });
        Some(id)
    }

    fn cancel(&self, handle: u64) {
        self.queue.borrow_mut().retain(|t| t.id != handle);
    }
}

/// Clipboard whose writes stay pending until resolved, in call order.
pub struct ManualClipboard {
    pending: RefCell<VecDeque<(String, ClipboardDone)>>,
    contents: RefCell<Option<String>>,
    available: bool,
}

impl ManualClipboard {
    pub fn new() -> Self {
        Self {
            pending: RefCell::new(VecDeque::new()),
            contents: RefCell::new(None),
            available: true,
        }
    }

    /// A clipboard that rejects every write immediately.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Settles the oldest pending write. Returns `false` if none is pending.
    pub fn resolve_next(&self, result: Result<(), ClipboardError>) -> bool {
        let next = self.pending.borrow_mut().pop_front();
        let Some((text, done)) = next else {
            return false;
        };
        if result.is_ok() {
            *self.contents.borrow_mut() = Some(text);
        }
        done(result);
        true
    }
}

impl Default for ManualClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for ManualClipboard {
    fn write_text(&self, text: String, done: ClipboardDone) {
        if !self.available {
            done(Err(ClipboardError::Unavailable));
            return;
        }
        self.pending.borrow_mut().push_back((text, done));
    }
}

/// Collects alert messages instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
