//! Durable client-side key-value storage.
//!
//! The session layer persists exactly one value (the serialized login) and
//! must survive process restarts. [`KeyValueStore`] abstracts over where that
//! value lives:
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`MemoryStore`] | any | `HashMap` behind a mutex, for tests and ephemeral runs |
//! | [`FileStore`] | native | one file per key under a base directory |
//! | `LocalStorageStore` | wasm + `web` feature | the browser's `localStorage` |

mod kv;
pub use kv::{validate_key, KeyValueStore, StoreError};

mod memory;
pub use memory::MemoryStore;

mod file_store;
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;
