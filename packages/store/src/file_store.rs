//! # Filesystem-backed key-value store
//!
//! [`FileStore`] persists each key as its own file under a base directory. It
//! is used on desktop platforms so a login survives restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── currentUser        # value for key "currentUser"
//! └── .currentUser.tmp   # transient, only during a write
//! ```
//!
//! Writes go to a dot-prefixed temp file first and are renamed over the
//! target, so a crash mid-write leaves either the old or the new value, never a
//! truncated one. Keys can never collide with temp files because
//! [`validate_key`] rejects a leading `.`.
//!
//! ## Platform data directories
//!
//! Callers usually pass `dirs::data_dir().join("staykonnect")`:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/staykonnect/` |
//! | Linux | `~/.local/share/staykonnect/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\staykonnect\` |

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::kv::{validate_key, KeyValueStore, StoreError};

/// Filesystem-backed KeyValueStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.base.join(key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.base.join(format!(".{key}.tmp"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.base)?;
        let tmp = self.temp_path(key);
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
