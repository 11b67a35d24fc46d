//! `localStorage` as a [`KeyValueStore`].

use web_sys::Storage;

use super::describe_js;
use crate::app_core::errors::StorageError;
use crate::app_core::host::KeyValueStore;

/// `window.localStorage`. Private browsing modes may deny access outright, in
/// which case every call reports [`StorageError::Unavailable`].
#[derive(Clone)]
pub struct WebStorage {
    storage: Option<Storage>,
}

impl WebStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                tracing::debug!(error = %describe_js(&err), "localStorage access denied");
                None
            }
        });
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|err| StorageError::Rejected {
                op: "read",
                key: key.to_string(),
                message: describe_js(&err),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| StorageError::Rejected {
                op: "write",
                key: key.to_string(),
                message: describe_js(&err),
            })
    }
}
