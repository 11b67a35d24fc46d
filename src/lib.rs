//! ruff-web library: browser helpers for Ruff! generated documentation pages.

pub mod app_core;
pub mod matcher;
pub mod model;
pub mod runtime;
pub mod theme;
