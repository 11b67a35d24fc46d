//! The index page's incremental filter.
//!
//! Keystrokes set a "Searching..." status and schedule a debounced pass. A
//! pass hides every entry that does not start with the query. If the last key
//! was Enter and something matches, the page goes to the first match instead.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::app_core::debounce::Debouncer;
use crate::app_core::host::Timers;
use crate::app_core::input::AppKeyCode;
use crate::matcher::{self, FilterResult};
use crate::model::IndexEntry;

/// Status shown while a pass is pending.
pub const SEARCHING_STATUS: &str = "Searching...";
/// Idle status. A non-breaking space keeps the status line's height.
pub const IDLE_STATUS: &str = "\u{a0}";

/// The index page elements the filter drives.
pub trait IndexView {
    /// Entries in page order.
    fn entries(&self) -> Vec<IndexEntry>;
    fn query(&self) -> String;
    fn set_query(&self, query: &str);
    fn set_visible(&self, index: usize, visible: bool);
    fn set_status(&self, text: &str);
    fn navigate(&self, target: &str);
    fn focus_input(&self);
}

/// What a filter pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPass {
    /// The list was updated.
    Rendered { match_count: usize },
    /// Enter was pressed on a match; the page is navigating away.
    Navigated { target: String },
}

struct FilterCore<V> {
    view: V,
    entries: Vec<IndexEntry>,
    last_key: Cell<AppKeyCode>,
}

impl<V: IndexView> FilterCore<V> {
    fn run(&self) -> FilterPass {
        let query = self.view.query();

        if self.last_key.get().is_activate()
            && let Some(idx) = matcher::first_prefix_match(&self.entries, &query)
        {
            let target = self.entries[idx].target.clone();
            tracing::debug!(%query, %target, "jumping to index entry");
            self.view.navigate(&target);
            return FilterPass::Navigated { target };
        }

        let FilterResult {
            visible,
            match_count,
            ..
        } = matcher::filter_sorted(&self.entries, &query);
        for (idx, shown) in visible.into_iter().enumerate() {
            self.view.set_visible(idx, shown);
        }
        self.view.set_status(IDLE_STATUS);
        FilterPass::Rendered { match_count }
    }
}

pub struct IndexFilter<V, T: Timers> {
    core: Rc<FilterCore<V>>,
    debounce: Debouncer<T>,
}

impl<V, T> IndexFilter<V, T>
where
    V: IndexView + 'static,
    T: Timers + 'static,
{
    /// Reads the entries once; the index list is static for the page's life.
    pub fn new(view: V, timers: Rc<T>, delay: Duration) -> Self {
        let entries = view.entries();
        if let Some(idx) = matcher::first_unsorted(&entries) {
            tracing::warn!(
                position = idx,
                label = %entries[idx].label,
                "index entries are not sorted; filter results may be incomplete"
            );
        }
        Self {
            core: Rc::new(FilterCore {
                view,
                entries,
                last_key: Cell::new(AppKeyCode::Other),
            }),
            debounce: Debouncer::new(timers, delay),
        }
    }

    /// Page-load hook: prefill from the URL, run one pass, focus the input.
    pub fn init(&self, url_query: &str) -> FilterPass {
        if !url_query.is_empty() {
            self.core.view.set_query(url_query);
        }
        let pass = self.run_now();
        self.core.view.focus_input();
        pass
    }

    /// Keystroke hook: remembers the key and schedules a debounced pass.
    pub fn on_key(&self, key: AppKeyCode) {
        self.core.last_key.set(key);
        self.core.view.set_status(SEARCHING_STATUS);
        let core = Rc::clone(&self.core);
        let scheduled = self.debounce.call(move || {
            core.run();
        });
        if !scheduled {
            // Without a timer nothing would clear the searching status.
            self.core.run();
        }
    }

    /// Runs a pass immediately, dropping any pending debounced one.
    pub fn run_now(&self) -> FilterPass {
        self.debounce.cancel();
        self.core.run()
    }

    pub fn entry_count(&self) -> usize {
        self.core.entries.len()
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }
}
