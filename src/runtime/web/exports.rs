//! Functions exported to page scripts.
//!
//! Generated pages call these from inline handlers (`onkeyup`, `onclick`)
//! under the names below, so the names are part of the page contract.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, Window};

use super::clipboard::{NavigatorClipboard, WindowAlert};
use super::dom::{
    self, DomElement, DomIndexView, DomNavControl, DomRoot, LegacyLookup, ModernLookup,
};
use super::logging;
use super::storage::WebStorage;
use super::timers::WindowTimers;
use crate::app_core::capabilities::EngineProfile;
use crate::app_core::config::{CONFIG_ATTRIBUTE, PageConfig};
use crate::app_core::errors::HostError;
use crate::app_core::host::Notifier;
use crate::app_core::index_filter::IndexFilter;
use crate::app_core::input::AppKeyCode;
use crate::app_core::nav_pane::NavPaneManager;
use crate::app_core::query::initial_query;
use crate::app_core::source_toggle::SourceToggle;
use crate::model::NavSide;
use crate::theme::ThemeManager;

// ---------------------------------------------------------------------------
// Page controller
// ---------------------------------------------------------------------------

struct Page {
    window: Window,
    document: Document,
    config: PageConfig,
    config_error: RefCell<Option<HostError>>,
    engine: EngineProfile,
    store: WebStorage,
    timers: Rc<WindowTimers>,
    themes: ThemeManager<WebStorage, DomRoot>,
    sources: SourceToggle<DomElement>,
    filter: RefCell<Option<IndexFilter<DomIndexView, WindowTimers>>>,
}

impl Page {
    fn bind() -> Result<Self> {
        let window = web_sys::window().ok_or(HostError::MissingApi("window"))?;
        let document = window.document().ok_or(HostError::MissingApi("document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| HostError::MissingElement("html".to_string()))?;

        let (config, config_error) =
            match PageConfig::from_attribute(root.get_attribute(CONFIG_ATTRIBUTE).as_deref()) {
                Ok(config) => (config, None),
                Err(err) => (PageConfig::default(), Some(err)),
            };

        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let store = WebStorage::local();
        let themes = ThemeManager::with_catalog(
            store.clone(),
            DomRoot::new(root),
            config.themes.clone(),
            config.default_theme.clone(),
        );
        let sources = SourceToggle::new()
            .with_lookup(ModernLookup::new(document.clone()))
            .with_lookup(LegacyLookup::new(document.clone()));

        Ok(Self {
            timers: Rc::new(WindowTimers::new(window.clone())),
            engine: EngineProfile::from_user_agent(&user_agent),
            window,
            document,
            config,
            config_error: RefCell::new(config_error),
            store,
            themes,
            sources,
            filter: RefCell::new(None),
        })
    }

    /// The move control is optional and may not be parsed yet when the
    /// script runs, so it is looked up per call.
    fn nav(&self) -> Option<NavPaneManager<WebStorage, DomNavControl>> {
        match DomNavControl::bind(&self.document, &self.config) {
            Ok(view) => Some(NavPaneManager::new(self.store.clone(), view)),
            Err(err) => {
                tracing::debug!(%err, "no nav pane control on this page");
                None
            }
        }
    }

    fn on_ready(self: &Rc<Self>) -> Result<()> {
        if let Some(nav) = self.nav() {
            let layout = nav.init();
            tracing::debug!(side = %layout.side, "nav pane restored");
        }

        let clipboard = Rc::new(NavigatorClipboard::new(self.window.clone()));
        let notifier: Rc<dyn Notifier> = Rc::new(WindowAlert::new(self.window.clone()));
        let added = dom::inject_copy_buttons(
            &self.document,
            &self.config,
            &self.timers,
            &clipboard,
            &notifier,
        )?;
        tracing::debug!(added, "copy buttons injected");
        Ok(())
    }
}

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

fn page() -> Result<Rc<Page>> {
    if let Some(page) = PAGE.with(|slot| slot.borrow().clone()) {
        return Ok(page);
    }
    let page = Rc::new(Page::bind().context("binding page")?);
    PAGE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&page)));
    Ok(page)
}

/// Runs `action` against the page, logging any failure. Exports never throw
/// into page scripts.
fn with_page<R>(what: &str, action: impl FnOnce(&Rc<Page>) -> Result<R>) -> Option<R> {
    match page().and_then(|page| action(&page)) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(what, "{err:#}");
            None
        }
    }
}

fn when_ready(document: &Document, task: impl FnOnce() + 'static) {
    let state = Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string());
    if state.as_deref() != Some("loading") {
        task();
        return;
    }
    let callback = Closure::once_into_js(task);
    if let Err(err) =
        document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
    {
        tracing::warn!(error = %super::describe_js(&err), "could not wait for DOMContentLoaded");
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Module start: logging, theme, then nav pane and copy buttons once the
/// document is parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "web")]
    console_error_panic_hook::set_once();

    let page = page().map_err(|err| JsValue::from_str(&format!("{err:#}")))?;
    logging::init(&page.config.log_filter);
    if let Some(err) = page.config_error.borrow_mut().take() {
        tracing::warn!(%err, "ignoring {CONFIG_ATTRIBUTE}; using defaults");
    }

    let theme = page.themes.init();
    tracing::debug!(%theme, "theme applied");

    let ready = Rc::clone(&page);
    when_ready(&page.document, move || {
        if let Err(err) = ready.on_ready() {
            tracing::warn!("page setup incomplete: {err:#}");
        }
    });
    Ok(())
}

/// Index page load: binds the filter, prefills it from `?lookup=`/`?search=`
/// and runs one pass.
#[wasm_bindgen(js_name = myIndexInit)]
pub fn my_index_init() {
    with_page("index init", |page| {
        let view = DomIndexView::bind(&page.window, &page.document, &page.config)?;
        let delay = page
            .config
            .debounce_override()
            .unwrap_or_else(|| page.engine.debounce_delay());
        let filter = IndexFilter::new(view, Rc::clone(&page.timers), delay);
        let search = page.window.location().search().unwrap_or_default();
        let pass = filter.init(&initial_query(&search));
        tracing::debug!(?pass, entries = filter.entry_count(), "index filter ready");
        *page.filter.borrow_mut() = Some(filter);
        Ok(())
    });
}

/// Key handler of the filter input. Falls back to `window.event` when the
/// page passes no event.
#[wasm_bindgen(js_name = myFilterHook)]
pub fn my_filter_hook(event: JsValue) {
    with_page("filter", |page| {
        let key = key_of(&page.window, event);
        let filter = page.filter.borrow();
        let filter = filter
            .as_ref()
            .ok_or_else(|| anyhow!("myIndexInit has not run"))?;
        filter.on_key(key);
        Ok(())
    });
}

fn key_of(window: &Window, event: JsValue) -> AppKeyCode {
    let event = if event.is_undefined() || event.is_null() {
        Reflect::get(window, &JsValue::from_str("event")).unwrap_or(JsValue::UNDEFINED)
    } else {
        event
    };
    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
        return AppKeyCode::Other;
    };
    let key = event.key();
    if key.is_empty() {
        AppKeyCode::from_key_code(event.key_code())
    } else {
        AppKeyCode::from_dom_key(&key)
    }
}

/// Shows or hides the source block `id`. Returns whether anything changed.
#[wasm_bindgen(js_name = toggleSource)]
pub fn toggle_source(id: &str) -> bool {
    with_page("toggle source", |page| match page.sources.toggle(id) {
        Ok(visibility) => {
            tracing::debug!(%id, ?visibility, "source toggled");
            Ok(true)
        }
        Err(err) => {
            tracing::debug!(%id, %err, "source toggle skipped");
            Ok(false)
        }
    })
    .unwrap_or(false)
}

#[wasm_bindgen(js_name = ruffSetTheme)]
pub fn ruff_set_theme(name: &str) {
    with_page("set theme", |page| {
        page.themes.set_theme(name);
        Ok(())
    });
}

/// Advances to the next theme and returns its name.
#[wasm_bindgen(js_name = ruffNextTheme)]
pub fn ruff_next_theme() -> String {
    with_page("next theme", |page| Ok(page.themes.next_theme())).unwrap_or_default()
}

#[wasm_bindgen(js_name = ruffToggleTheme)]
pub fn ruff_toggle_theme() -> String {
    with_page("toggle theme", |page| Ok(page.themes.toggle_light_dark())).unwrap_or_default()
}

/// Moves the nav pane to `side` ("left" or "right"; anything else is left).
#[wasm_bindgen(js_name = ruffSetNavSide)]
pub fn ruff_set_nav_side(side: &str) {
    with_page("set nav side", |page| {
        let nav = page.nav().context("nav pane control not found")?;
        nav.set_side(NavSide::from_stored(Some(side)));
        Ok(())
    });
}

/// Moves the nav pane to the other side.
#[wasm_bindgen(js_name = ruffMoveNavPane)]
pub fn ruff_move_nav_pane() {
    with_page("move nav pane", |page| {
        let nav = page.nav().context("nav pane control not found")?;
        let layout = nav.toggle();
        tracing::debug!(side = %layout.side, "nav pane moved");
        Ok(())
    });
}
