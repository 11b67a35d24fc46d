//! Error types of the host ports and page binding.

use thiserror::Error;

/// Errors raised by a key-value store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The page has no usable local storage (disabled, sandboxed, quota zero).
    #[error("local storage is unavailable")]
    Unavailable,
    /// The backend rejected a read or write.
    #[error("storage {op} failed for key {key:?}: {message}")]
    Rejected {
        op: &'static str,
        key: String,
        message: String,
    },
}

/// Errors reported by an asynchronous clipboard write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The browser exposes no asynchronous clipboard API.
    #[error("clipboard API is not available")]
    Unavailable,
    /// The write promise was rejected (permission denied, insecure context).
    #[error("clipboard write was rejected: {0}")]
    Rejected(String),
}

/// Errors from the show/hide source toggle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceToggleError {
    /// Neither the modern nor the legacy element lookup exists.
    #[error("no element lookup API is available")]
    LookupUnavailable,
    /// The block or its link is not on the page.
    #[error("element {0:?} not found")]
    MissingElement(String),
}

/// Errors raised while binding controllers to the host page.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("required element {0} not found")]
    MissingElement(String),
    #[error("{0} is not available in this environment")]
    MissingApi(&'static str),
    #[error("page config JSON is invalid")]
    Config(#[from] serde_json::Error),
}
