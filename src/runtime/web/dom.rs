//! DOM-backed views, source lookups and copy-button injection.

use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use super::describe_js;
use crate::app_core::config::PageConfig;
use crate::app_core::copy_button::{CopyButtonView, CopyFeedback, icon_for};
use crate::app_core::errors::HostError;
use crate::app_core::host::{Clipboard, Notifier, Timers};
use crate::app_core::index_filter::IndexView;
use crate::app_core::nav_pane::{NavLayout, NavLayoutView};
use crate::app_core::source_toggle::{ElementLookup, SourceElement};
use crate::model::{CopyState, IndexEntry};
use crate::theme::ThemeRoot;

fn element_by_id(document: &Document, id: &str) -> Result<Element, HostError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| HostError::MissingElement(format!("#{id}")))
}

fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, HostError> {
    element_by_id(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| HostError::MissingElement(format!("#{id} (HTML element)")))
}

fn set_style(element: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = element.style().set_property(name, value) {
        tracing::debug!(%name, %value, error = %describe_js(&err), "style update rejected");
    }
}

// ---------------------------------------------------------------------------
// Index page
// ---------------------------------------------------------------------------

/// The filter input, status line and `li` entries of the index page.
pub struct DomIndexView {
    window: Window,
    input: HtmlInputElement,
    status: HtmlElement,
    items: Vec<HtmlElement>,
}

impl DomIndexView {
    pub fn bind(window: &Window, document: &Document, config: &PageConfig) -> Result<Self, HostError> {
        let input = element_by_id(document, &config.filter_input_id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| HostError::MissingElement(format!("#{} (input)", config.filter_input_id)))?;
        let status = html_by_id(document, &config.status_id)?;
        let list = element_by_id(document, &config.index_list_id)?;

        let collection = list.get_elements_by_tag_name("li");
        let items = (0..collection.length())
            .filter_map(|idx| collection.item(idx))
            .filter_map(|item| item.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Self {
            window: window.clone(),
            input,
            status,
            items,
        })
    }
}

impl IndexView for DomIndexView {
    fn entries(&self) -> Vec<IndexEntry> {
        self.items
            .iter()
            .map(|item| match item.get_elements_by_tag_name("a").item(0) {
                Some(link) => IndexEntry::new(
                    link.text_content().unwrap_or_default(),
                    link.get_attribute("href").unwrap_or_default(),
                ),
                None => IndexEntry::new(String::new(), String::new()),
            })
            .collect()
    }

    fn query(&self) -> String {
        self.input.value()
    }

    fn set_query(&self, query: &str) {
        self.input.set_value(query);
    }

    fn set_visible(&self, index: usize, visible: bool) {
        if let Some(item) = self.items.get(index) {
            set_style(item, "display", if visible { "" } else { "none" });
        }
    }

    fn set_status(&self, text: &str) {
        self.status.set_inner_text(text);
    }

    fn navigate(&self, target: &str) {
        if let Err(err) = self.window.location().set_href(target) {
            tracing::warn!(%target, error = %describe_js(&err), "navigation failed");
        }
    }

    fn focus_input(&self) {
        if let Err(err) = self.input.focus() {
            tracing::debug!(error = %describe_js(&err), "could not focus filter input");
        }
    }
}

// ---------------------------------------------------------------------------
// Theme and nav pane
// ---------------------------------------------------------------------------

/// `document.documentElement`.
#[derive(Clone)]
pub struct DomRoot {
    root: Element,
}

impl DomRoot {
    pub fn new(root: Element) -> Self {
        Self { root }
    }
}

impl ThemeRoot for DomRoot {
    fn class_name(&self) -> String {
        self.root.class_name()
    }

    fn set_class_name(&self, class_name: &str) {
        self.root.set_class_name(class_name);
    }
}

/// Root grid custom properties plus the move control.
pub struct DomNavControl {
    root: HtmlElement,
    control: HtmlElement,
}

impl DomNavControl {
    pub fn bind(document: &Document, config: &PageConfig) -> Result<Self, HostError> {
        let root = document
            .document_element()
            .and_then(|root| root.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| HostError::MissingElement("html".to_string()))?;
        let control = html_by_id(document, &config.nav_control_id)?;
        Ok(Self { root, control })
    }
}

impl NavLayoutView for DomNavControl {
    fn apply(&self, layout: &NavLayout) {
        for (name, value) in layout.root_properties() {
            set_style(&self.root, name, value);
        }
        self.control.set_text_content(Some(layout.glyph));
        for (name, value) in layout.control_borders() {
            set_style(&self.control, name, value);
        }
    }
}

// ---------------------------------------------------------------------------
// Source blocks
// ---------------------------------------------------------------------------

pub struct DomElement(HtmlElement);

impl SourceElement for DomElement {
    fn display(&self) -> String {
        self.0.style().get_property_value("display").unwrap_or_default()
    }

    fn set_display(&self, value: &str) {
        set_style(&self.0, "display", value);
    }

    fn set_label(&self, text: &str) {
        self.0.set_inner_html(text);
    }
}

/// `document.getElementById`.
pub struct ModernLookup {
    document: Document,
}

impl ModernLookup {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ElementLookup for ModernLookup {
    type Element = DomElement;

    fn is_available(&self) -> bool {
        Reflect::has(&self.document, &JsValue::from_str("getElementById")).unwrap_or(false)
    }

    fn find(&self, id: &str) -> Option<DomElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .map(DomElement)
    }
}

/// `document.all[id]`. The collection compares loosely equal to `undefined`
/// but is never strictly so, which is what the availability check relies on.
pub struct LegacyLookup {
    document: Document,
}

impl LegacyLookup {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn all(&self) -> Option<JsValue> {
        Reflect::get(&self.document, &JsValue::from_str("all"))
            .ok()
            .filter(|all| !all.is_undefined() && !all.is_null())
    }
}

impl ElementLookup for LegacyLookup {
    type Element = DomElement;

    fn is_available(&self) -> bool {
        self.all().is_some()
    }

    fn find(&self, id: &str) -> Option<DomElement> {
        let found = Reflect::get(&self.all()?, &JsValue::from_str(id)).ok()?;
        found.dyn_into::<HtmlElement>().ok().map(DomElement)
    }
}

// ---------------------------------------------------------------------------
// Copy buttons
// ---------------------------------------------------------------------------

pub struct DomCopyButton {
    button: HtmlElement,
    copied_class: String,
}

impl CopyButtonView for DomCopyButton {
    fn render(&self, state: CopyState) {
        self.button.set_text_content(Some(icon_for(state)));
        let copied = state == CopyState::Copied;
        if let Err(err) = self
            .button
            .class_list()
            .toggle_with_force(&self.copied_class, copied)
        {
            tracing::debug!(error = %describe_js(&err), "could not toggle copied class");
        }
    }
}

/// Text of the first `pre` inside `figure`, read at click time.
fn snippet_text(figure: &Element) -> Option<String> {
    figure.query_selector("pre").ok().flatten()?.text_content()
}

/// Puts a copy button at the top of every figure matching the configured
/// selector. Returns how many were added.
pub fn inject_copy_buttons<T, C>(
    document: &Document,
    config: &PageConfig,
    timers: &Rc<T>,
    clipboard: &Rc<C>,
    notifier: &Rc<dyn Notifier>,
) -> Result<usize, HostError>
where
    T: Timers + 'static,
    C: Clipboard + 'static,
{
    let figures = document
        .query_selector_all(&config.snippet_selector)
        .map_err(|err| HostError::MissingElement(format!("{} ({})", config.snippet_selector, describe_js(&err))))?;

    let mut added = 0;
    for idx in 0..figures.length() {
        let Some(figure) = figures.item(idx).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let button = document
            .create_element("button")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            .ok_or(HostError::MissingApi("document.createElement"))?;
        // Best effort: a button without these still works.
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("title", "Copy to clipboard");
        button.set_class_name(&config.copy_button_class);

        let feedback = CopyFeedback::new(
            DomCopyButton {
                button: button.clone(),
                copied_class: config.copied_class.clone(),
            },
            Rc::clone(timers),
            Rc::clone(notifier),
            config.copy_revert_delay(),
        );

        let clipboard = Rc::clone(clipboard);
        let source = figure.clone();
        let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            match snippet_text(&source) {
                Some(text) => feedback.copy(clipboard.as_ref(), text),
                None => tracing::warn!("snippet figure has no pre element"),
            }
        });
        if let Err(err) =
            button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
        {
            tracing::warn!(error = %describe_js(&err), "could not attach copy handler");
            continue;
        }
        // The button lives as long as the page.
        on_click.forget();

        let first = figure.first_child();
        if let Err(err) = figure.insert_before(&button, first.as_ref()) {
            tracing::warn!(error = %describe_js(&err), "could not insert copy button");
            continue;
        }
        added += 1;
    }
    Ok(added)
}
