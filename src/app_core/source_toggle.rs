//! "Show source" / "Hide source" links.
//!
//! A procedure's source block has id `<id>` and its link has id `l_<id>`.
//! Elements are found through a chain of lookups; the first one the host
//! supports is used.

use crate::app_core::errors::SourceToggleError;
use crate::model::SourceVisibility;

/// Prefix that turns a block id into its link id.
pub const LINK_ID_PREFIX: &str = "l_";

pub fn link_id(id: &str) -> String {
    format!("{LINK_ID_PREFIX}{id}")
}

/// The bits of an element the toggle reads and writes.
pub trait SourceElement {
    /// Inline `style.display` value.
    fn display(&self) -> String;
    fn set_display(&self, value: &str);
    fn set_label(&self, text: &str);
}

/// A way of finding elements by id.
pub trait ElementLookup {
    type Element: SourceElement;

    /// Whether the host provides this lookup at all.
    fn is_available(&self) -> bool;
    fn find(&self, id: &str) -> Option<Self::Element>;
}

pub struct SourceToggle<E> {
    lookups: Vec<Box<dyn ElementLookup<Element = E>>>,
}

impl<E: SourceElement> Default for SourceToggle<E> {
    fn default() -> Self {
        Self {
            lookups: Vec::new(),
        }
    }
}

impl<E: SourceElement> SourceToggle<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a lookup; earlier lookups take priority.
    pub fn with_lookup(mut self, lookup: impl ElementLookup<Element = E> + 'static) -> Self {
        self.lookups.push(Box::new(lookup));
        self
    }

    /// Flips block `id` between shown and hidden and relabels its link.
    /// Nothing changes on error.
    pub fn toggle(&self, id: &str) -> Result<SourceVisibility, SourceToggleError> {
        let lookup = self
            .lookups
            .iter()
            .find(|lookup| lookup.is_available())
            .ok_or(SourceToggleError::LookupUnavailable)?;

        let block = lookup
            .find(id)
            .ok_or_else(|| SourceToggleError::MissingElement(id.to_string()))?;
        let link_id = link_id(id);
        let link = lookup
            .find(&link_id)
            .ok_or(SourceToggleError::MissingElement(link_id))?;

        let next = match SourceVisibility::from_display(&block.display()) {
            SourceVisibility::Shown => SourceVisibility::Hidden,
            SourceVisibility::Hidden => SourceVisibility::Shown,
        };
        block.set_display(next.display_value());
        link.set_label(next.link_label());
        Ok(next)
    }
}
