//! Shared data model types used by both native and web runtimes.

use std::fmt;
use std::str::FromStr;

/// One row of the generated index page: the visible label plus its link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Text shown in the list and matched against the query.
    pub label: String,
    /// Navigation target (the link's `href`).
    pub target: String,
}

impl IndexEntry {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

impl AsRef<str> for IndexEntry {
    fn as_ref(&self) -> &str {
        &self.label
    }
}

/// Which side of the page the navigation pane occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavSide {
    #[default]
    Left,
    Right,
}

impl NavSide {
    pub fn as_str(self) -> &'static str {
        match self {
            NavSide::Left => "left",
            NavSide::Right => "right",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            NavSide::Left => NavSide::Right,
            NavSide::Right => NavSide::Left,
        }
    }

    /// Resolves a persisted value, treating anything unrecognized as `Left`.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for NavSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(NavSide::Left),
            "right" => Ok(NavSide::Right),
            other => Err(format!("unknown nav side: {other:?}")),
        }
    }
}

impl fmt::Display for NavSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visibility of a collapsible source block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceVisibility {
    Shown,
    Hidden,
}

impl SourceVisibility {
    /// Inline `display` value that represents this state.
    pub fn display_value(self) -> &'static str {
        match self {
            SourceVisibility::Shown => "block",
            SourceVisibility::Hidden => "none",
        }
    }

    /// Label for the toggle link, offering the opposite action.
    pub fn link_label(self) -> &'static str {
        match self {
            SourceVisibility::Shown => "Hide source",
            SourceVisibility::Hidden => "Show source",
        }
    }

    /// Only an explicit `block` counts as expanded; blocks start out unstyled.
    pub fn from_display(display: &str) -> Self {
        if display == "block" {
            SourceVisibility::Shown
        } else {
            SourceVisibility::Hidden
        }
    }
}

/// Transient feedback state of a copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyState {
    #[default]
    Idle,
    Copied,
}
