//! Navigation pane placement (left or right of the main content).
//!
//! The page grid reads two custom properties from the root element; the move
//! control shows an arrow and one thick border edge. All of it is derived
//! from a single [`NavLayout`] and handed to the view in one call.

use crate::app_core::host::{KeyValueStore, read_or_absent, write_or_log};
use crate::model::NavSide;

/// Storage key of the persisted side.
pub const NAV_SIDE_KEY: &str = "ruff_nav_side";

pub const GRID_AREAS_PROPERTY: &str = "--ruff-grid-template-areas";
pub const GRID_COLUMNS_PROPERTY: &str = "--ruff-grid-template-columns";

/// Everything needed to render one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLayout {
    pub side: NavSide,
    /// Value for [`GRID_AREAS_PROPERTY`].
    pub grid_areas: &'static str,
    /// Value for [`GRID_COLUMNS_PROPERTY`].
    pub grid_columns: &'static str,
    /// Text of the move control.
    pub glyph: &'static str,
}

impl NavLayout {
    pub fn for_side(side: NavSide) -> Self {
        match side {
            NavSide::Right => Self {
                side,
                grid_areas: r#""toparea toparea" "mainarea navarea" "botarea botarea""#,
                grid_columns: "1fr minmax(200px, min-content)",
                glyph: "\u{25c0}",
            },
            NavSide::Left => Self {
                side,
                grid_areas: r#""toparea toparea" "navarea mainarea" "botarea botarea""#,
                grid_columns: "minmax(200px, min-content) 1fr",
                glyph: "\u{25b6}",
            },
        }
    }

    /// Root-element custom properties as `(name, value)` pairs.
    pub fn root_properties(&self) -> [(&'static str, &'static str); 2] {
        [
            (GRID_AREAS_PROPERTY, self.grid_areas),
            (GRID_COLUMNS_PROPERTY, self.grid_columns),
        ]
    }

    /// Border declarations for the move control.
    ///
    /// Edge style and width are set separately so the theme's border colour
    /// is left alone.
    pub fn control_borders(&self) -> [(&'static str, &'static str); 3] {
        match self.side {
            NavSide::Right => [
                ("border-left", "none"),
                ("border-right-style", "solid"),
                ("border-right-width", "thick"),
            ],
            NavSide::Left => [
                ("border-right", "none"),
                ("border-left-style", "solid"),
                ("border-left-width", "thick"),
            ],
        }
    }
}

/// Where a [`NavLayout`] gets rendered.
pub trait NavLayoutView {
    /// Applies the whole layout; implementations must not leave the grid and
    /// the control disagreeing between calls.
    fn apply(&self, layout: &NavLayout);
}

pub struct NavPaneManager<S, V> {
    store: S,
    view: V,
}

impl<S: KeyValueStore, V: NavLayoutView> NavPaneManager<S, V> {
    pub fn new(store: S, view: V) -> Self {
        Self { store, view }
    }

    /// The persisted side; missing or unknown values read as `Left`.
    pub fn current(&self) -> NavSide {
        let stored = read_or_absent(&self.store, NAV_SIDE_KEY);
        NavSide::from_stored(stored.as_deref())
    }

    pub fn set_side(&self, side: NavSide) -> NavLayout {
        write_or_log(&self.store, NAV_SIDE_KEY, side.as_str());
        let layout = NavLayout::for_side(side);
        self.view.apply(&layout);
        tracing::debug!(%side, "nav pane moved");
        layout
    }

    /// Moves to the right only from a stored `left`; from anything else,
    /// including a missing or unknown value, moves to the left.
    pub fn toggle(&self) -> NavLayout {
        let stored = read_or_absent(&self.store, NAV_SIDE_KEY);
        let next = match stored.as_deref() {
            Some(side) if side == NavSide::Left.as_str() => NavSide::Right,
            _ => NavSide::Left,
        };
        self.set_side(next)
    }

    pub fn init(&self) -> NavLayout {
        self.set_side(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::native::{MemoryNavControl, MemoryStore};
    use std::rc::Rc;

    fn manager() -> (
        Rc<MemoryStore>,
        MemoryNavControl,
        NavPaneManager<Rc<MemoryStore>, MemoryNavControl>,
    ) {
        let store = Rc::new(MemoryStore::new());
        let control = MemoryNavControl::new();
        let nav = NavPaneManager::new(Rc::clone(&store), control.clone());
        (store, control, nav)
    }

    #[test]
    fn init_defaults_to_left() {
        let (store, control, nav) = manager();
        assert_eq!(nav.init().side, NavSide::Left);
        assert_eq!(store.value(NAV_SIDE_KEY).as_deref(), Some("left"));
        assert_eq!(control.glyph(), "\u{25b6}");
        assert_eq!(
            control.root_property(GRID_COLUMNS_PROPERTY).as_deref(),
            Some("minmax(200px, min-content) 1fr")
        );
        assert_eq!(control.style("border-left-style").as_deref(), Some("solid"));
        assert_eq!(control.style("border-right-style").as_deref(), Some("none"));
    }

    #[test]
    fn malformed_stored_side_reads_as_left() {
        for stored in ["", "up", "RIGHT"] {
            let (store, _control, nav) = manager();
            store.insert(NAV_SIDE_KEY, stored);
            assert_eq!(nav.init().side, NavSide::Left, "{stored:?}");
        }
    }

    #[test]
    fn init_restores_right() {
        let (store, control, nav) = manager();
        store.insert(NAV_SIDE_KEY, "right");
        assert_eq!(nav.init().side, NavSide::Right);
        assert_eq!(control.glyph(), "\u{25c0}");
        assert_eq!(
            control.root_property(GRID_AREAS_PROPERTY).as_deref(),
            Some(r#""toparea toparea" "mainarea navarea" "botarea botarea""#)
        );
        assert_eq!(control.style("border-left-style").as_deref(), Some("none"));
        assert_eq!(control.style("border-right-width").as_deref(), Some("thick"));
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        for start in [NavSide::Left, NavSide::Right] {
            let (store, control, nav) = manager();
            nav.set_side(start);
            let before = (store.snapshot(), control.snapshot());

            assert_eq!(nav.toggle().side, start.opposite());
            assert_ne!(control.snapshot(), before.1);
            assert_eq!(nav.toggle().side, start);
            assert_eq!((store.snapshot(), control.snapshot()), before);
        }
    }

    #[test]
    fn toggle_from_missing_or_unknown_goes_left() {
        let (store, control, nav) = manager();
        assert_eq!(nav.toggle().side, NavSide::Left);
        assert_eq!(store.value(NAV_SIDE_KEY).as_deref(), Some("left"));
        assert_eq!(control.glyph(), "\u{25b6}");

        for stored in ["", "up"] {
            let (store, _control, nav) = manager();
            store.insert(NAV_SIDE_KEY, stored);
            assert_eq!(nav.toggle().side, NavSide::Left, "{stored:?}");
            assert_eq!(store.value(NAV_SIDE_KEY).as_deref(), Some("left"));
        }
    }

    #[test]
    fn toggle_from_left_goes_right() {
        let (store, _control, nav) = manager();
        store.insert(NAV_SIDE_KEY, "left");
        assert_eq!(nav.toggle().side, NavSide::Right);
        assert_eq!(store.value(NAV_SIDE_KEY).as_deref(), Some("right"));
    }

    #[test]
    fn every_layout_update_is_a_single_apply() {
        let (_store, control, nav) = manager();
        nav.init();
        nav.toggle();
        nav.toggle();
        assert_eq!(control.apply_count(), 3);
    }
}
