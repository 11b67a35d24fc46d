//! Runtime-specific modules split by target platform.
//!
//! `web` binds the shared core to the browser; `native` is the headless
//! in-memory host used off the browser.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;

#[cfg(target_arch = "wasm32")]
pub mod web;
