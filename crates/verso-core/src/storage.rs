use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use verso_config::storage::StorageConfig;
use verso_types::{Preferences, TextEntry};

use crate::error::StoreError;

/// Persistence for the translation memory and the user switches.
///
/// Every save replaces the whole value; callers serialize access.
pub trait MemoryStorage: Send + Sync {
    fn load_entries(&self) -> Result<Vec<TextEntry>, StoreError>;

    fn save_entries(&self, entries: &[TextEntry]) -> Result<(), StoreError>;

    fn load_preferences(&self) -> Result<Preferences, StoreError>;

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError>;
}

/// Two JSON files in the data directory
pub struct JsonFileStorage {
    entries_path: PathBuf,
    preferences_path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(entries_path: PathBuf, preferences_path: PathBuf) -> Self {
        Self {
            entries_path,
            preferences_path,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.entries_path(), config.preferences_path())
    }
}

fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StoreError> {
    if !path.exists() {
        return Ok(T::default());
    }

    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(T::default());
    }

    serde_json::from_str(&data)
        .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))
}

/// Write to a sibling temp file, then rename over the target
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    file.persist(path).map_err(|e| StoreError::Io(e.error))?;

    Ok(())
}

impl MemoryStorage for JsonFileStorage {
    fn load_entries(&self) -> Result<Vec<TextEntry>, StoreError> {
        read_json(&self.entries_path)
    }

    fn save_entries(&self, entries: &[TextEntry]) -> Result<(), StoreError> {
        write_json(&self.entries_path, entries)
    }

    fn load_preferences(&self) -> Result<Preferences, StoreError> {
        read_json(&self.preferences_path)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        write_json(&self.preferences_path, preferences)
    }
}

/// Process-local storage, nothing survives a restart
#[derive(Default)]
pub struct InMemoryStorage {
    entries: Mutex<Vec<TextEntry>>,
    preferences: Mutex<Preferences>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<TextEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            preferences: Mutex::new(Preferences::default()),
        }
    }
}

fn poisoned() -> StoreError {
    StoreError::Corrupt("storage lock poisoned".to_string())
}

impl MemoryStorage for InMemoryStorage {
    fn load_entries(&self) -> Result<Vec<TextEntry>, StoreError> {
        Ok(self.entries.lock().map_err(|_| poisoned())?.clone())
    }

    fn save_entries(&self, entries: &[TextEntry]) -> Result<(), StoreError> {
        *self.entries.lock().map_err(|_| poisoned())? = entries.to_vec();
        Ok(())
    }

    fn load_preferences(&self) -> Result<Preferences, StoreError> {
        Ok(*self.preferences.lock().map_err(|_| poisoned())?)
    }

    fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        *self.preferences.lock().map_err(|_| poisoned())? = *preferences;
        Ok(())
    }
}
