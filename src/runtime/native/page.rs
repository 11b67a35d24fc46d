//! In-memory page elements for every controller view.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use foldhash::HashMap;

use crate::app_core::copy_button::{CopyButtonView, icon_for};
use crate::app_core::index_filter::{IDLE_STATUS, IndexView};
use crate::app_core::nav_pane::{NavLayout, NavLayoutView};
use crate::app_core::source_toggle::{ElementLookup, SourceElement};
use crate::model::{CopyState, IndexEntry};
use crate::theme::ThemeRoot;

#[derive(Default)]
struct IndexPage {
    entries: Vec<IndexEntry>,
    visible: Vec<bool>,
    query: String,
    status: String,
    navigations: Vec<String>,
    focused: bool,
    passes: usize,
}

/// The index page: input, status line and entry list.
#[derive(Clone, Default)]
pub struct MemoryIndexView {
    page: Rc<RefCell<IndexPage>>,
}

impl MemoryIndexView {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        let visible = vec![true; entries.len()];
        Self {
            page: Rc::new(RefCell::new(IndexPage {
                entries,
                visible,
                ..IndexPage::default()
            })),
        }
    }

    /// Entries linking to `#<label>`.
    pub fn with_labels(labels: &[&str]) -> Self {
        Self::new(
            labels
                .iter()
                .map(|label| IndexEntry::new(*label, format!("#{label}")))
                .collect(),
        )
    }

    pub fn visible_labels(&self) -> Vec<String> {
        let page = self.page.borrow();
        page.entries
            .iter()
            .zip(&page.visible)
            .filter(|(_, shown)| **shown)
            .map(|(entry, _)| entry.label.clone())
            .collect()
    }

    pub fn status(&self) -> String {
        self.page.borrow().status.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.page.borrow().navigations.clone()
    }

    pub fn is_focused(&self) -> bool {
        self.page.borrow().focused
    }

    /// Completed filter passes, counted as writes of the idle status.
    pub fn passes(&self) -> usize {
        self.page.borrow().passes
    }
}

impl IndexView for MemoryIndexView {
    fn entries(&self) -> Vec<IndexEntry> {
        self.page.borrow().entries.clone()
    }

    fn query(&self) -> String {
        self.page.borrow().query.clone()
    }

    fn set_query(&self, query: &str) {
        self.page.borrow_mut().query = query.to_string();
    }

    fn set_visible(&self, index: usize, visible: bool) {
        if let Some(slot) = self.page.borrow_mut().visible.get_mut(index) {
            *slot = visible;
        }
    }

    fn set_status(&self, text: &str) {
        let mut page = self.page.borrow_mut();
        if text == IDLE_STATUS {
            page.passes += 1;
        }
        page.status = text.to_string();
    }

    fn navigate(&self, target: &str) {
        self.page.borrow_mut().navigations.push(target.to_string());
    }

    fn focus_input(&self) {
        self.page.borrow_mut().focused = true;
    }
}

/// `document.documentElement`'s class attribute.
#[derive(Clone, Default)]
pub struct MemoryRoot {
    class_name: Rc<RefCell<String>>,
}

impl MemoryRoot {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: Rc::new(RefCell::new(class_name.to_string())),
        }
    }
}

impl ThemeRoot for MemoryRoot {
    fn class_name(&self) -> String {
        self.class_name.borrow().clone()
    }

    fn set_class_name(&self, class_name: &str) {
        *self.class_name.borrow_mut() = class_name.to_string();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavControlSnapshot {
    pub glyph: String,
    pub root_properties: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
}

#[derive(Default)]
struct NavControlState {
    snapshot: NavControlSnapshot,
    applies: usize,
}

/// Root grid properties plus the move control's text and inline style.
#[derive(Clone, Default)]
pub struct MemoryNavControl {
    state: Rc<RefCell<NavControlState>>,
}

impl MemoryNavControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn glyph(&self) -> String {
        self.state.borrow().snapshot.glyph.clone()
    }

    pub fn root_property(&self, name: &str) -> Option<String> {
        self.state.borrow().snapshot.root_properties.get(name).cloned()
    }

    pub fn style(&self, name: &str) -> Option<String> {
        self.state.borrow().snapshot.styles.get(name).cloned()
    }

    pub fn snapshot(&self) -> NavControlSnapshot {
        self.state.borrow().snapshot.clone()
    }

    pub fn apply_count(&self) -> usize {
        self.state.borrow().applies
    }
}

/// Sets one inline style declaration. A `border-<edge>: none` shorthand
/// expands into its style and width longhands, as CSSOM does.
fn set_style(styles: &mut BTreeMap<String, String>, name: &str, value: &str) {
    if matches!(name, "border-left" | "border-right") && value == "none" {
        styles.insert(format!("{name}-style"), "none".to_string());
        styles.insert(format!("{name}-width"), "medium".to_string());
    } else {
        styles.insert(name.to_string(), value.to_string());
    }
}

impl NavLayoutView for MemoryNavControl {
    fn apply(&self, layout: &NavLayout) {
        let mut state = self.state.borrow_mut();
        state.applies += 1;
        let snapshot = &mut state.snapshot;
        for (name, value) in layout.root_properties() {
            snapshot
                .root_properties
                .insert(name.to_string(), value.to_string());
        }
        snapshot.glyph = layout.glyph.to_string();
        for (name, value) in layout.control_borders() {
            set_style(&mut snapshot.styles, name, value);
        }
    }
}

#[derive(Default)]
struct ElementState {
    display: String,
    label: String,
}

/// An element reachable by id.
#[derive(Clone, Default)]
pub struct MemoryElement(Rc<RefCell<ElementState>>);

impl SourceElement for MemoryElement {
    fn display(&self) -> String {
        self.0.borrow().display.clone()
    }

    fn set_display(&self, value: &str) {
        self.0.borrow_mut().display = value.to_string();
    }

    fn set_label(&self, text: &str) {
        self.0.borrow_mut().label = text.to_string();
    }
}

type ElementMap = Rc<RefCell<HashMap<String, MemoryElement>>>;

/// Elements by id, reachable through lookups of varying availability.
#[derive(Clone, Default)]
pub struct MemorySourceDom {
    elements: ElementMap,
}

impl MemorySourceDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element with no inline display and the given text.
    pub fn add_element(&self, id: &str, label: &str) {
        let element = MemoryElement::default();
        element.set_label(label);
        self.elements.borrow_mut().insert(id.to_string(), element);
    }

    pub fn display(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(SourceElement::display)
    }

    pub fn label(&self, id: &str) -> Option<String> {
        self.elements.borrow().get(id).map(|e| e.0.borrow().label.clone())
    }

    /// The `getElementById` path.
    pub fn modern(&self) -> MemoryLookup {
        self.lookup(true)
    }

    /// The `document.all` path.
    pub fn legacy(&self) -> MemoryLookup {
        self.lookup(true)
    }

    /// A lookup the host does not provide.
    pub fn unavailable(&self) -> MemoryLookup {
        self.lookup(false)
    }

    fn lookup(&self, available: bool) -> MemoryLookup {
        MemoryLookup {
            elements: Rc::clone(&self.elements),
            available,
        }
    }
}

pub struct MemoryLookup {
    elements: ElementMap,
    available: bool,
}

impl ElementLookup for MemoryLookup {
    type Element = MemoryElement;

    fn is_available(&self) -> bool {
        self.available
    }

    fn find(&self, id: &str) -> Option<MemoryElement> {
        self.elements.borrow().get(id).cloned()
    }
}

#[derive(Default)]
struct CopyButtonState {
    icon: String,
    copied: bool,
}

#[derive(Clone, Default)]
pub struct MemoryCopyButton {
    state: Rc<RefCell<CopyButtonState>>,
}

impl MemoryCopyButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn icon(&self) -> String {
        self.state.borrow().icon.clone()
    }

    pub fn has_copied_class(&self) -> bool {
        self.state.borrow().copied
    }
}

impl CopyButtonView for MemoryCopyButton {
    fn render(&self, state: CopyState) {
        let mut button = self.state.borrow_mut();
        button.icon = icon_for(state).to_string();
        button.copied = state == CopyState::Copied;
    }
}
