//! Platform storage constructor.
//!
//! Returns the [`store::KeyValueStore`] a [`SessionStore`](crate::SessionStore)
//! should persist into:
//! - **Web** (WASM + `web` feature): `window.localStorage` via [`store::LocalStorageStore`]
//! - **Native**: one file per key via [`store::FileStore`]

use std::path::PathBuf;
use std::sync::Arc;

use store::KeyValueStore;

/// Directory name under the platform data directory.
pub const APP_DIR: &str = "staykonnect";

/// Default native storage location: `<data_dir>/staykonnect`, or
/// `./staykonnect` when the platform has no data directory.
pub fn default_storage_dir() -> PathBuf {
    #[cfg(not(target_arch = "wasm32"))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
    #[cfg(target_arch = "wasm32")]
    {
        PathBuf::from(APP_DIR)
    }
}

/// Create the platform-appropriate session storage.
///
/// `dir` overrides the native location and is ignored on the web.
pub fn make_session_storage(dir: Option<PathBuf>) -> Arc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        let _ = dir;
        Arc::new(store::LocalStorageStore::with_namespace(Some(APP_DIR)))
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let dir = dir.unwrap_or_else(default_storage_dir);
        tracing::debug!(dir = %dir.display(), "session storage");
        Arc::new(store::FileStore::new(dir))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_default_dir_ends_with_app_dir() {
        assert!(default_storage_dir().ends_with(APP_DIR));
    }

    #[test]
    fn test_explicit_dir_is_used() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("sessions");
        let storage = make_session_storage(Some(dir.clone()));
        storage.set("currentUser", "{}").unwrap();
        assert!(dir.join("currentUser").exists());
    }
}
