//! Headless host: in-memory implementations of every port.
//!
//! Controllers run here exactly as they do in the browser, against plain Rust
//! state. Timers only advance when told to, and clipboard writes settle only
//! when resolved, so callers decide every interleaving explicitly.
//!
//! This is the crate's non-browser runtime, public so that tools and other
//! crates can drive the page controllers without a DOM:
//!
//! ```
//! use std::rc::Rc;
//!
//! use ruff_web::runtime::native::{MemoryRoot, MemoryStore};
//! use ruff_web::theme::{THEME_KEY, ThemeManager, ThemeRoot};
//!
//! let store = Rc::new(MemoryStore::new());
//! let root = MemoryRoot::new("no-js");
//! let themes = ThemeManager::new(Rc::clone(&store), root.clone());
//!
//! assert_eq!(themes.next_theme(), "v1");
//! assert_eq!(root.class_name(), "no-js ruff-theme-v1");
//! assert_eq!(store.value(THEME_KEY).as_deref(), Some("v1"));
//! ```

mod host;
mod page;

pub use host::{ManualClipboard, ManualTimers, MemoryStore, RecordingNotifier};
pub use page::{
    MemoryCopyButton, MemoryElement, MemoryIndexView, MemoryLookup, MemoryNavControl, MemoryRoot,
    MemorySourceDom, NavControlSnapshot,
};
