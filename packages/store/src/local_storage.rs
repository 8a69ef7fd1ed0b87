//! # Browser `localStorage` store: web persistence
//!
//! [`LocalStorageStore`] is the [`KeyValueStore`] used on the **web platform**.
//! Values survive page reloads for the lifetime of the origin's storage.
//!
//! ## Connection management
//!
//! The store holds no JS handles. `web_sys::Storage` is neither `Send` nor
//! `Sync`, so every operation looks up `window.localStorage` afresh, which
//! keeps the struct usable behind `Arc<dyn KeyValueStore>`.
//!
//! ## Namespacing
//!
//! With a namespace, key `currentUser` is stored as `<namespace>:currentUser`,
//! so several clients sharing an origin do not overwrite each other.

use crate::kv::{KeyValueStore, StoreError};

/// localStorage-backed KeyValueStore for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: Option<String>,
}

impl LocalStorageStore {
    /// Create an unscoped store; keys are used verbatim.
    pub fn new() -> Self {
        Self::with_namespace(None)
    }

    /// Create a store whose keys are prefixed with `namespace:`.
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        Self {
            prefix: namespace.map(|ns| format!("{ns}:")),
        }
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}{key}"),
            None => key.to_string(),
        }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(&self.full_key(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.full_key(key), value)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(&self.full_key(key))
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
