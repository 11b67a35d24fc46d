//! Colour themes for generated pages.
//!
//! The stylesheet defines one `ruff-theme-<name>` class per theme. Exactly one
//! of those classes is present on the document root at a time. The chosen
//! name and the catalog itself are persisted, so a page from a newer release
//! can add or drop themes without breaking the cycle order for older pages.

use crate::app_core::host::{KeyValueStore, read_or_absent, write_or_log};

/// Built-in theme names in cycle order.
pub const BUILTIN_THEMES: &[&str] = &["v1", "light", "dark", "slate", "solar", "clouds", "maroon"];

/// Theme applied when nothing valid is stored.
pub const DEFAULT_THEME: &str = "v1";

/// Storage key of the current theme name.
pub const THEME_KEY: &str = "ruff_theme";
/// Storage key of the theme catalog (JSON array of strings).
pub const THEMES_KEY: &str = "ruff_themes";

pub const THEME_CLASS_PREFIX: &str = "ruff-theme-";

const LIGHT_THEME: &str = "light";
const DARK_THEME: &str = "dark";

/// The element carrying the theme class (`document.documentElement`).
pub trait ThemeRoot {
    fn class_name(&self) -> String;
    fn set_class_name(&self, class_name: &str);
}

pub fn theme_class(name: &str) -> String {
    format!("{THEME_CLASS_PREFIX}{name}")
}

/// Replaces every theme class in `existing` with the class for `name`,
/// keeping unrelated classes in their original order.
pub fn apply_theme_class(existing: &str, name: &str) -> String {
    let mut classes: Vec<&str> = existing
        .split_whitespace()
        .filter(|class| !class.starts_with(THEME_CLASS_PREFIX))
        .collect();
    let theme = theme_class(name);
    classes.push(&theme);
    classes.join(" ")
}

/// Index of the theme after `current` in `themes`, wrapping at the end.
///
/// No current theme, or one the catalog does not know, starts from index 0.
pub fn next_index(themes: &[String], current: Option<&str>) -> usize {
    if themes.is_empty() {
        return 0;
    }
    current
        .and_then(|name| themes.iter().position(|theme| theme == name))
        .map_or(0, |idx| (idx + 1) % themes.len())
}

pub struct ThemeManager<S, R> {
    store: S,
    root: R,
    themes: Vec<String>,
    default_theme: String,
}

impl<S: KeyValueStore, R: ThemeRoot> ThemeManager<S, R> {
    pub fn new(store: S, root: R) -> Self {
        Self::with_catalog(
            store,
            root,
            BUILTIN_THEMES.iter().map(|t| t.to_string()).collect(),
            DEFAULT_THEME.to_string(),
        )
    }

    pub fn with_catalog(store: S, root: R, themes: Vec<String>, default_theme: String) -> Self {
        Self {
            store,
            root,
            themes,
            default_theme,
        }
    }

    /// Persists `name` and makes it the only active theme class.
    pub fn set_theme(&self, name: &str) {
        write_or_log(&self.store, THEME_KEY, name);
        let class_name = apply_theme_class(&self.root.class_name(), name);
        self.root.set_class_name(&class_name);
        tracing::debug!(theme = name, "theme applied");
    }

    /// Advances to the next theme of the persisted catalog and applies it.
    pub fn next_theme(&self) -> String {
        let themes = self.persisted_catalog();
        let current = self.current();
        let next = themes[next_index(&themes, current.as_deref())].clone();
        self.set_theme(&next);
        next
    }

    /// Switches between `light` and `dark`; any other theme goes to `dark`.
    pub fn toggle_light_dark(&self) -> String {
        let next = match self.current().as_deref() {
            Some(DARK_THEME) => LIGHT_THEME,
            _ => DARK_THEME,
        };
        self.set_theme(next);
        next.to_string()
    }

    /// Page-load hook: rewrites the stored catalog, then applies the stored
    /// theme if this catalog still has it, else the default.
    pub fn init(&self) -> String {
        match serde_json::to_string(&self.themes) {
            Ok(json) => write_or_log(&self.store, THEMES_KEY, &json),
            Err(err) => tracing::warn!(%err, "could not encode theme catalog"),
        }

        let theme = self
            .current()
            .filter(|name| self.themes.contains(name))
            .unwrap_or_else(|| {
                tracing::debug!(default = %self.default_theme, "no valid stored theme");
                self.default_theme.clone()
            });
        self.set_theme(&theme);
        theme
    }

    /// The stored theme name, if any.
    pub fn current(&self) -> Option<String> {
        read_or_absent(&self.store, THEME_KEY)
    }

    /// The stored catalog, or this manager's own when the stored one is
    /// missing, malformed or empty.
    pub fn persisted_catalog(&self) -> Vec<String> {
        let stored = read_or_absent(&self.store, THEMES_KEY)
            .and_then(|json| match serde_json::from_str::<Vec<String>>(&json) {
                Ok(themes) => Some(themes),
                Err(err) => {
                    tracing::debug!(%err, "stored theme catalog is malformed");
                    None
                }
            })
            .filter(|themes| !themes.is_empty());
        match stored {
            Some(themes) => themes,
            None if self.themes.is_empty() => vec![self.default_theme.clone()],
            None => self.themes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::native::{MemoryRoot, MemoryStore};
    use std::rc::Rc;

    fn manager() -> (Rc<MemoryStore>, MemoryRoot, ThemeManager<Rc<MemoryStore>, MemoryRoot>) {
        let store = Rc::new(MemoryStore::new());
        let root = MemoryRoot::new("no-js");
        let themes = ThemeManager::new(Rc::clone(&store), root.clone());
        (store, root, themes)
    }

    #[test]
    fn test_apply_theme_class_is_exclusive() {
        assert_eq!(apply_theme_class("", "dark"), "ruff-theme-dark");
        assert_eq!(
            apply_theme_class("a ruff-theme-v1 b ruff-theme-slate", "dark"),
            "a b ruff-theme-dark"
        );
    }

    #[test]
    fn test_next_index_wraps_and_recovers() {
        let themes: Vec<String> = ["a", "b", "c"].iter().map(|t| t.to_string()).collect();
        assert_eq!(next_index(&themes, None), 0);
        assert_eq!(next_index(&themes, Some("a")), 1);
        assert_eq!(next_index(&themes, Some("c")), 0);
        assert_eq!(next_index(&themes, Some("gone")), 0);
        assert_eq!(next_index(&[], Some("a")), 0);
    }

    #[test]
    fn test_set_theme_is_idempotent() {
        let (store, root, themes) = manager();
        themes.set_theme("dark");
        let once = (root.class_name(), store.snapshot());
        themes.set_theme("dark");
        assert_eq!((root.class_name(), store.snapshot()), once);
        assert_eq!(root.class_name(), "no-js ruff-theme-dark");
        assert_eq!(store.value(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_init_defaults_and_rewrites_catalog() {
        let (store, root, themes) = manager();
        store.insert(THEME_KEY, "retired-theme");
        store.insert(THEMES_KEY, r#"["retired-theme"]"#);

        assert_eq!(themes.init(), DEFAULT_THEME);
        assert_eq!(root.class_name(), "no-js ruff-theme-v1");
        let catalog: Vec<String> = serde_json::from_str(&store.value(THEMES_KEY).unwrap()).unwrap();
        assert_eq!(catalog, BUILTIN_THEMES);
    }

    #[test]
    fn test_init_keeps_valid_stored_theme() {
        let (store, root, themes) = manager();
        store.insert(THEME_KEY, "solar");
        assert_eq!(themes.init(), "solar");
        assert_eq!(root.class_name(), "no-js ruff-theme-solar");
    }

    #[test]
    fn test_next_theme_from_nothing_lands_on_first() {
        let (_store, root, themes) = manager();
        assert_eq!(themes.next_theme(), "v1");
        assert_eq!(root.class_name(), "no-js ruff-theme-v1");
        assert_eq!(themes.next_theme(), "light");
    }

    #[test]
    fn test_next_theme_full_cycle_returns_to_start() {
        for start in BUILTIN_THEMES {
            let (store, _root, themes) = manager();
            themes.init();
            themes.set_theme(start);
            for _ in 0..BUILTIN_THEMES.len() {
                themes.next_theme();
            }
            assert_eq!(store.value(THEME_KEY).as_deref(), Some(*start));
        }
    }

    #[test]
    fn test_next_theme_follows_persisted_catalog() {
        let (store, _root, themes) = manager();
        store.insert(THEMES_KEY, r#"["x", "y"]"#);
        store.insert(THEME_KEY, "y");
        assert_eq!(themes.next_theme(), "x");

        store.insert(THEMES_KEY, "not json");
        assert_eq!(themes.next_theme(), "v1");
    }

    #[test]
    fn test_toggle_light_dark() {
        let (_store, root, themes) = manager();
        assert_eq!(themes.toggle_light_dark(), "dark");
        assert_eq!(themes.toggle_light_dark(), "light");
        assert_eq!(themes.toggle_light_dark(), "dark");
        assert_eq!(root.class_name(), "no-js ruff-theme-dark");
    }

    #[test]
    fn test_broken_storage_still_applies_theme() {
        let store = Rc::new(MemoryStore::unavailable());
        let root = MemoryRoot::new("");
        let themes = ThemeManager::new(Rc::clone(&store), root.clone());
        assert_eq!(themes.init(), DEFAULT_THEME);
        assert_eq!(root.class_name(), "ruff-theme-v1");
        assert_eq!(themes.next_theme(), "v1");
    }
}
