//! Persistent key-value storage
//!
//! History and preferences are each stored as one JSON blob under a fixed
//! key. Reads never fail outward: a missing or corrupt blob decodes to the
//! caller's default.

use crate::{Result, SaybackError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key of the persisted history list
pub const HISTORY_KEY: &str = "history";

/// Key of the persisted preferences object
pub const PREFERENCES_KEY: &str = "preferences";

/// String key-value storage
pub trait KeyValueStore {
    /// Read the raw value for `key`, `None` if never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Decode the JSON value at `key`, or `T::default()` if absent or unreadable
pub fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for {:?}, using default", key);
            return T::default();
        }
        Err(e) => {
            warn!("Failed to read {:?}, using default: {}", key, e);
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Stored {:?} is not valid, using default: {}", key, e);
        T::default()
    })
}

/// Encode `value` as JSON and write it under `key`
pub fn save_json<T>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// Store keeping one `<key>.json` file per key in a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (creating if needed) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SaybackError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        debug!("File store at {:?}", dir);
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SaybackError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a half-written blob
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path).map_err(|e| {
            SaybackError::Storage(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// In-memory store, nothing survives the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
