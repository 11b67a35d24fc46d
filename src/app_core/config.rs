//! Page-level configuration.
//!
//! Defaults match the markup the documentation generator emits. A page may
//! override any field with a JSON object in the root element's
//! `data-ruff-config` attribute; absent keys keep their defaults.

use serde::Deserialize;
use std::time::Duration;

use crate::app_core::errors::HostError;
use crate::theme::{BUILTIN_THEMES, DEFAULT_THEME};

/// Attribute on `<html>` holding an optional JSON override of [`PageConfig`].
pub const CONFIG_ATTRIBUTE: &str = "data-ruff-config";

/// Delay before a copy button falls back to its idle look.
pub const COPY_REVERT_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Id of the index filter text input.
    pub filter_input_id: String,
    /// Id of the element showing filter progress.
    pub status_id: String,
    /// Id of the `ul` holding the index entries.
    pub index_list_id: String,
    /// Id of the nav-pane move control.
    pub nav_control_id: String,
    /// Selector for figures that get a copy button.
    pub snippet_selector: String,
    /// Class given to injected copy buttons.
    pub copy_button_class: String,
    /// Class present on a copy button while it shows the "copied" state.
    pub copied_class: String,
    /// Debounce override in milliseconds; `None` defers to the engine profile.
    pub debounce_ms: Option<u64>,
    /// How long the "copied" state lasts, in milliseconds.
    pub copy_revert_ms: u64,
    /// Theme names in cycle order.
    pub themes: Vec<String>,
    /// Theme applied when nothing valid is stored.
    pub default_theme: String,
    /// `tracing` filter directive for the browser console.
    pub log_filter: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            filter_input_id: "filterText".to_string(),
            status_id: "indexStatus".to_string(),
            index_list_id: "indexUL".to_string(),
            nav_control_id: "ruffNavMove".to_string(),
            snippet_selector: "figure.ruff-snippet".to_string(),
            copy_button_class: "ruff-copy-button".to_string(),
            copied_class: "ruff-copied".to_string(),
            debounce_ms: None,
            copy_revert_ms: COPY_REVERT_DELAY.as_millis() as u64,
            themes: BUILTIN_THEMES.iter().map(|t| t.to_string()).collect(),
            default_theme: DEFAULT_THEME.to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl PageConfig {
    /// Parses an override object. `None` or a blank attribute yields defaults.
    pub fn from_attribute(raw: Option<&str>) -> Result<Self, HostError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(json) => Ok(serde_json::from_str(json)?),
        }
    }

    pub fn copy_revert_delay(&self) -> Duration {
        Duration::from_millis(self.copy_revert_ms)
    }

    pub fn debounce_override(&self) -> Option<Duration> {
        self.debounce_ms.map(Duration::from_millis)
    }
}
