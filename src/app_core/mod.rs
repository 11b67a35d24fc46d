//! Shared page core: host ports, configuration and the widget controllers.

pub mod capabilities;
pub mod config;
pub mod copy_button;
pub mod debounce;
pub mod errors;
pub mod host;
pub mod index_filter;
pub mod input;
pub mod nav_pane;
pub mod query;
pub mod source_toggle;
